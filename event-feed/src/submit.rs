use std::collections::HashMap;

use log::debug;
use reqwest::Client;

use crate::FeedError;

/// A third-party form endpoint (e.g. a Google Form) that accepts submissions
/// keyed by opaque entry identifiers.
#[derive(Debug, Clone)]
pub struct FormSink {
    action: String,
    fields: Vec<(String, String)>,
}

impl FormSink {
    pub fn new<S: Into<String>>(action: S) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// Maps the submitted field `name` onto the endpoint's `entry` identifier.
    #[must_use]
    pub fn field<N: Into<String>, E: Into<String>>(mut self, name: N, entry: E) -> Self {
        self.fields.push((name.into(), entry.into()));
        self
    }

    /// Translates submitted values into entry pairs. Every mapped field must
    /// be present and not blank; unmapped values are ignored.
    pub fn encode<'a>(
        &'a self,
        values: &'a HashMap<String, String>,
    ) -> Result<Vec<(&'a str, &'a str)>, FeedError> {
        self.fields
            .iter()
            .map(|(name, entry)| match values.get(name) {
                Some(value) if !value.trim().is_empty() => Ok((entry.as_str(), value.as_str())),
                _ => Err(FeedError::MissingField(name.clone())),
            })
            .collect()
    }

    /// Posts the submission. The endpoint's reply is not inspected, only
    /// transport failures are reported.
    pub async fn submit(
        &self,
        client: &Client,
        values: &HashMap<String, String>,
    ) -> Result<(), FeedError> {
        let form = self.encode(values)?;

        let response = client
            .post(&self.action)
            .form(&form)
            .send()
            .await
            .map_err(|source| FeedError::Request {
                url: self.action.clone(),
                source,
            })?;

        debug!(
            "Form endpoint {} answered with {}",
            self.action,
            response.status()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> FormSink {
        FormSink::new("https://forms.example/formResponse")
            .field("name", "entry.1")
            .field("email", "entry.2")
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn maps_fields_to_entries_in_declaration_order() {
        let values = values(&[
            ("email", "asha@example.com"),
            ("name", "Asha"),
            ("unmapped", "ignored"),
        ]);

        assert_eq!(
            sink().encode(&values).unwrap(),
            vec![("entry.1", "Asha"), ("entry.2", "asha@example.com")]
        );
    }

    #[test]
    fn blank_or_missing_fields_are_rejected() {
        let blank = values(&[("name", "  "), ("email", "asha@example.com")]);
        assert!(matches!(
            sink().encode(&blank),
            Err(FeedError::MissingField(field)) if field == "name"
        ));

        let missing = values(&[("name", "Asha")]);
        assert!(matches!(
            sink().encode(&missing),
            Err(FeedError::MissingField(field)) if field == "email"
        ));
    }
}
