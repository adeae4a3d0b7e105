//! Form descriptors submitted to the portal endpoint.
//!
//! Every request is a flat `application/x-www-form-urlencoded` body. The
//! `ARGUMENTS` field names the other fields that act as positional
//! parameters for the program in `PRGNAME`.

use std::collections::BTreeMap;

pub const FIELD_APPNAME: &str = "APPNAME";
pub const FIELD_PRGNAME: &str = "PRGNAME";
pub const FIELD_ARGUMENTS: &str = "ARGUMENTS";

/// A single form submission. Keys are unique; order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    fields: BTreeMap<String, String>,
}

impl FormRequest {
    /// Start a form for `program` under the given application name.
    pub fn new(app_name: &str, program: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(FIELD_APPNAME.to_string(), app_name.to_string());
        fields.insert(FIELD_PRGNAME.to_string(), program.to_string());
        fields.insert(FIELD_ARGUMENTS.to_string(), String::new());
        Self { fields }
    }

    /// Set the `ARGUMENTS` field.
    pub fn arguments(self, arguments: impl Into<String>) -> Self {
        self.field(FIELD_ARGUMENTS, arguments)
    }

    /// Set a field, replacing any previous value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn program(&self) -> &str {
        self.get(FIELD_PRGNAME).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names listed in `ARGUMENTS`, when it is a comma-separated name list.
    pub fn positional_names(&self) -> Vec<&str> {
        self.get(FIELD_ARGUMENTS)
            .map(|args| args.split(',').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// URL-encoded request body.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_carries_required_keys() {
        let form = FormRequest::new("CampusNet", "EXTERNALPAGES");
        assert_eq!(form.get(FIELD_APPNAME), Some("CampusNet"));
        assert_eq!(form.program(), "EXTERNALPAGES");
        assert_eq!(form.get(FIELD_ARGUMENTS), Some(""));
    }

    #[test]
    fn later_field_replaces_earlier() {
        let form = FormRequest::new("A", "P").field("x", "1").field("x", "2");
        assert_eq!(form.get("x"), Some("2"));
        assert_eq!(form.len(), 4);
    }

    #[test]
    fn positional_names_split_on_commas() {
        let form = FormRequest::new("A", "P").arguments("sessionno,menuid,date");
        assert_eq!(form.positional_names(), vec!["sessionno", "menuid", "date"]);
    }

    #[test]
    fn encode_escapes_reserved_characters() {
        let body = FormRequest::new("A", "P")
            .arguments("-N1")
            .field("pass", "a&b=c d")
            .encode();
        assert!(body.contains("pass=a%26b%3Dc+d"));
        assert!(body.contains("APPNAME=A"));
        assert!(body.contains("ARGUMENTS=-N1"));
    }
}
