use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Address {
    pub name: String,
    pub street_and_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: Option<String>,
}

impl Address {
    pub fn new(
        name: impl ToString,
        street_and_number: impl ToString,
        postal_code: impl ToString,
        city: impl ToString,
        country: Option<impl ToString>,
    ) -> Self {
        Self {
            name: name.to_string(),
            street_and_number: street_and_number.to_string(),
            postal_code: postal_code.to_string(),
            city: city.to_string(),
            country: country.map(|c| c.to_string()),
        }
    }

    /// Street line and `"<postal code> <city>"`, skipping whatever is blank.
    pub fn address_lines(&self) -> Vec<String> {
        let street = self.street_and_number.trim();
        let town = format!("{} {}", self.postal_code.trim(), self.city.trim());
        [street, town.trim()]
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_postal_address(&self) -> bool {
        !self.address_lines().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn lines_skip_blank_parts() {
        let full = Address::new("Dojo", "Hauptstr. 1", "10115", "Berlin", Some("DE"));
        assert_eq!(full.address_lines(), vec!["Hauptstr. 1", "10115 Berlin"]);

        let city_only = Address::new("Dojo", " ", "", "Berlin", None::<&str>);
        assert_eq!(city_only.address_lines(), vec!["Berlin"]);

        let none = Address::new("Dojo", "", "", "", None::<&str>);
        assert!(!none.has_postal_address());
    }
}
