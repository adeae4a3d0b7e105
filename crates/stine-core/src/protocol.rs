//! Request shapes for the three portal programs this client speaks.
//!
//! The auxiliary values (`clino`, `menuno`, `menuid`, ...) only satisfy the
//! parameter shape the remote side expects; they carry no meaning here.

use crate::form::FormRequest;

pub const PRG_LOGIN: &str = "LOGINCHECK";
pub const PRG_EXTERNAL_PAGES: &str = "EXTERNALPAGES";
pub const PRG_SCHEDULER_EXPORT: &str = "SCHEDULER_EXPORT_START";

pub const LOGIN_ARGUMENTS: &str = "clino,usrname,pass,menuno,menu_type,browser,platform";
pub const EXPORT_ARGUMENTS: &str = "sessionno,menuid,date";

pub const CLIENT_NUMBER: &str = "000000000000001";
pub const LOGIN_MENU_NUMBER: &str = "000000";
pub const LOGIN_MENU_TYPE: &str = "classic";
pub const EXPORT_MENU_ID: &str = "000000";

/// Header carrying the post-login redirect.
pub const REFRESH_HEADER: &str = "refresh";

/// `LOGINCHECK` form for the given credentials.
pub fn login_request(app_name: &str, username: &str, password: &str) -> FormRequest {
    FormRequest::new(app_name, PRG_LOGIN)
        .arguments(LOGIN_ARGUMENTS)
        .field("clino", CLIENT_NUMBER)
        .field("usrname", username)
        .field("pass", password)
        .field("menuno", LOGIN_MENU_NUMBER)
        .field("menu_type", LOGIN_MENU_TYPE)
        .field("browser", "")
        .field("platform", "")
}

/// `EXTERNALPAGES` probe used to test whether a session is still alive.
pub fn session_check_request(app_name: &str, session_id: &str) -> FormRequest {
    FormRequest::new(app_name, PRG_EXTERNAL_PAGES).arguments(format!("-N{session_id}"))
}

/// `SCHEDULER_EXPORT_START` for a month (`Y2020M06`) or week (`Y2020W25`).
pub fn scheduler_export_request(app_name: &str, session_id: &str, date: &str) -> FormRequest {
    FormRequest::new(app_name, PRG_SCHEDULER_EXPORT)
        .arguments(EXPORT_ARGUMENTS)
        .field("sessionno", session_id)
        .field("menuid", EXPORT_MENU_ID)
        .field("date", date)
}
