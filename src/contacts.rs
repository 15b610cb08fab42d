//! Address book and the grouped contact list built from it.
//!
//! Contacts are grouped under the uppercased first letter of their last name,
//! or of their first name when they have no last name. Entries without any
//! name are left out.

use crate::api::models::Contact;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookEntry {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
}

impl AddressBookEntry {
    pub fn new(first_name: Option<&str>, last_name: Option<&str>, phones: &[&str]) -> Self {
        Self {
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            phones: phones.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    fn group_key(&self) -> Option<String> {
        let source = match (&self.first_name, &self.last_name) {
            (Some(_), Some(last)) => last,
            (Some(first), None) => first,
            _ => return None,
        };
        source.chars().next().map(|c| c.to_uppercase().collect())
    }

    /// The chat partner for this entry: first phone number, full name.
    pub fn to_contact(&self) -> Option<Contact> {
        let phone = self.phones.first()?;
        Some(Contact::new(phone.as_str(), self.label()))
    }
}

/// Contacts file: a list of `[[contacts]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    pub contacts: Vec<AddressBookEntry>,
}

impl AddressBook {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Order of contacts inside one letter group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactOrder {
    /// As enumerated from the address book.
    #[default]
    Enumeration,
    /// By last name, Z to A.
    LastNameDescending,
}

#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    groups: BTreeMap<String, Vec<AddressBookEntry>>,
    initials: Vec<String>,
}

impl ContactDirectory {
    pub fn build(entries: impl IntoIterator<Item = AddressBookEntry>, order: ContactOrder) -> Self {
        let mut groups: BTreeMap<String, Vec<AddressBookEntry>> = BTreeMap::new();
        for entry in entries {
            let Some(key) = entry.group_key() else {
                continue;
            };
            groups.entry(key).or_default().push(entry);
        }
        if order == ContactOrder::LastNameDescending {
            for list in groups.values_mut() {
                // stable, so equal last names keep enumeration order
                list.sort_by(|a, b| b.last_name.cmp(&a.last_name));
            }
        }
        let initials = groups.keys().cloned().collect();
        Self { groups, initials }
    }

    pub fn from_address_book(book: AddressBook, order: ContactOrder) -> Self {
        Self::build(book.contacts, order)
    }

    pub fn group_count(&self) -> usize {
        self.initials.len()
    }

    pub fn item_count(&self, group: usize) -> usize {
        self.group(group).map_or(0, Vec::len)
    }

    pub fn contact_at(&self, group: usize, row: usize) -> Option<&AddressBookEntry> {
        self.group(group)?.get(row)
    }

    pub fn header_title(&self, group: usize) -> Option<&str> {
        self.initials.get(group).map(String::as_str)
    }

    pub fn index_titles(&self) -> &[String] {
        &self.initials
    }

    /// Hands the entry at (`group`, `row`) to the chat screen.
    pub fn select(&self, group: usize, row: usize) -> Option<Contact> {
        self.contact_at(group, row)?.to_contact()
    }

    fn group(&self, group: usize) -> Option<&Vec<AddressBookEntry>> {
        self.groups.get(self.initials.get(group)?)
    }
}
