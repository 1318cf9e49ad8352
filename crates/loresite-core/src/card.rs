//! Card data carried on interactive card elements

pub const NAME_ATTR: &str = "data-name";
pub const INFO_ATTR: &str = "data-info";
pub const DESC_ATTR: &str = "data-desc";

/// Text a card contributes to the detail popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRecord {
    pub name: String,
    pub info: String,
    pub description: String,
}

impl CardRecord {
    pub fn new(
        name: impl Into<String>,
        info: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            info: info.into(),
            description: description.into(),
        }
    }

    /// Build from an attribute lookup; missing attributes read as empty text.
    pub fn from_attributes(mut attribute: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            name: attribute(NAME_ATTR).unwrap_or_default(),
            info: attribute(INFO_ATTR).unwrap_or_default(),
            description: attribute(DESC_ATTR).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_the_three_data_attributes() {
        let attrs: HashMap<&str, &str> = [
            ("data-name", "Alice"),
            ("data-info", "Mage"),
            ("data-desc", "A wizard"),
        ]
        .into_iter()
        .collect();

        let card = CardRecord::from_attributes(|name| attrs.get(name).map(|v| v.to_string()));
        assert_eq!(card, CardRecord::new("Alice", "Mage", "A wizard"));
    }

    #[test]
    fn missing_attributes_are_empty() {
        let card = CardRecord::from_attributes(|name| {
            (name == NAME_ATTR).then(|| "Bram".to_string())
        });
        assert_eq!(card.name, "Bram");
        assert!(card.info.is_empty());
        assert!(card.description.is_empty());
    }
}
