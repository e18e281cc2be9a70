pub mod validators;

use std::str::FromStr;

use derive_more::Display;
use serde_derive::{Deserialize, Serialize};

/// Value of the specialty select that reveals the free-text specialty input.
pub const OTHER_SPECIALTY: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownSpecialty {
    #[display(fmt = "engineer")]
    Engineer,
    #[display(fmt = "scientist")]
    Scientist,
    #[display(fmt = "psychologist")]
    Psychologist,
}

impl KnownSpecialty {
    pub const ALL: [KnownSpecialty; 3] = [
        KnownSpecialty::Engineer,
        KnownSpecialty::Scientist,
        KnownSpecialty::Psychologist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSpecialty::Engineer => "engineer",
            KnownSpecialty::Scientist => "scientist",
            KnownSpecialty::Psychologist => "psychologist",
        }
    }
}

/// Keys of the application record, in form order. The `Ord` impl follows
/// this order, so error maps list fields the way the form shows them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationField {
    #[display(fmt = "name")]
    Name,
    #[display(fmt = "phone")]
    Phone,
    #[display(fmt = "email")]
    Email,
    #[display(fmt = "birthDate")]
    BirthDate,
    #[display(fmt = "photo")]
    Photo,
    #[display(fmt = "specialty")]
    Specialty,
    #[display(fmt = "customSpecialty")]
    CustomSpecialty,
    #[display(fmt = "experience")]
    Experience,
    #[display(fmt = "password")]
    Password,
}

impl ApplicationField {
    pub const ALL: [ApplicationField; 9] = [
        ApplicationField::Name,
        ApplicationField::Phone,
        ApplicationField::Email,
        ApplicationField::BirthDate,
        ApplicationField::Photo,
        ApplicationField::Specialty,
        ApplicationField::CustomSpecialty,
        ApplicationField::Experience,
        ApplicationField::Password,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl FromStr for ApplicationField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationField::ALL
            .iter()
            .copied()
            .find(|field| field.to_string() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw applicant input, exactly as the form submitted it.
///
/// Missing keys decode to empty strings. `photo` holds the uploaded file name
/// and carries no rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub photo: Option<String>,
    pub specialty: String,
    pub custom_specialty: String,
    #[serde(deserialize_with = "string_or_number")]
    pub experience: String,
    pub password: String,
}

impl ApplicationForm {
    /// Builds a record from form-data style key/value pairs.
    /// Unknown keys are ignored; a repeated key keeps the last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in entries {
            match key.as_ref().parse::<ApplicationField>() {
                Ok(field) => form.set(field, value.into()),
                Err(UnknownField(key)) => log::debug!("ignoring unknown form field {}", key),
            }
        }
        form
    }

    pub fn set(&mut self, field: ApplicationField, value: String) {
        match field {
            ApplicationField::Name => self.name = value,
            ApplicationField::Phone => self.phone = value,
            ApplicationField::Email => self.email = value,
            ApplicationField::BirthDate => self.birth_date = value,
            ApplicationField::Photo => self.photo = Some(value).filter(|v| !v.is_empty()),
            ApplicationField::Specialty => self.specialty = value,
            ApplicationField::CustomSpecialty => self.custom_specialty = value,
            ApplicationField::Experience => self.experience = value,
            ApplicationField::Password => self.password = value,
        }
    }

    pub fn value(&self, field: ApplicationField) -> Option<&str> {
        match field {
            ApplicationField::Name => Some(self.name.as_str()),
            ApplicationField::Phone => Some(self.phone.as_str()),
            ApplicationField::Email => Some(self.email.as_str()),
            ApplicationField::BirthDate => Some(self.birth_date.as_str()),
            ApplicationField::Photo => self.photo.as_deref(),
            ApplicationField::Specialty => Some(self.specialty.as_str()),
            ApplicationField::CustomSpecialty => Some(self.custom_specialty.as_str()),
            ApplicationField::Experience => Some(self.experience.as_str()),
            ApplicationField::Password => Some(self.password.as_str()),
        }
    }
}

// JSON clients may send `"experience": 5` instead of `"5"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match <Raw as serde::Deserialize>::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
