//! Concept cards that reveal extra information on click.
//!
//! At most one card is open at a time. Clicking a closed card closes every
//! other card and opens it; clicking the open card closes it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCards {
    ids: Vec<String>,
    revealed: Option<String>,
}

impl InfoCards {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            revealed: None,
        }
    }

    /// Cards for the food-web roles shown on the page.
    pub fn ecosystem_roles() -> Self {
        Self::new(["producer", "consumer", "decomposer"])
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn revealed(&self) -> Option<&str> {
        self.revealed.as_deref()
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.as_deref() == Some(id)
    }

    /// Click a card. Unknown ids are ignored. Returns the card now open.
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if !self.ids.iter().any(|c| c == id) {
            log::warn!("ignoring click on unknown info card {:?}", id);
            return self.revealed();
        }
        if self.is_revealed(id) {
            self.revealed = None;
        } else {
            self.revealed = Some(id.to_string());
        }
        self.revealed()
    }
}
