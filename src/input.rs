use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Avatar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

/// Contact details as sent. Any key makes the block count as present, even
/// when none of the drawn fields has a value.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Contact(Map<String, Value>);

/// The avatar block once every required part is known to be present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarBlock<'a> {
    pub image: &'a str,
    pub name: &'a str,
    pub contact: &'a Contact,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl RenderInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn avatar_block(&self) -> Option<AvatarBlock<'_>> {
        let avatar = self.avatar.as_ref()?;
        let contact = avatar.contact.as_ref().filter(|c| !c.is_empty())?;
        Some(AvatarBlock {
            image: non_empty(&avatar.image)?,
            name: non_empty(&avatar.name)?,
            contact,
        })
    }

    pub fn uses_avatar(&self) -> bool {
        self.avatar_block().is_some()
    }
}

impl Contact {
    pub fn new() -> Self {
        Contact::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), Value::from(value));
        self
    }

    /// A drawable value: non-empty strings and numbers.
    fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn email(&self) -> Option<String> {
        self.field("email")
    }

    pub fn phone(&self) -> Option<String> {
        self.field("phone")
    }

    pub fn skype(&self) -> Option<String> {
        self.field("skype")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
