//! KillFeed - Bounded log of final blows for display

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What the killing hit was delivered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum KillContext {
    Weapon,
    Ability(String),
    Ultimate(String),
}

impl KillContext {
    pub fn new(ability: Option<&str>, ultimate: bool) -> Self {
        match ability {
            Some(id) if ultimate => KillContext::Ultimate(id.to_string()),
            Some(id) => KillContext::Ability(id.to_string()),
            None => KillContext::Weapon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillFeedEntry {
    pub killer: EntityId,
    pub killer_name: String,
    pub victim: EntityId,
    pub victim_name: String,
    /// Killer is on the player's team
    pub friendly: bool,
    pub headshot: bool,
    pub context: KillContext,
    /// World clock at the time of the kill
    pub time: f64,
}

impl KillFeedEntry {
    pub fn is_self_kill(&self) -> bool {
        self.killer == self.victim
    }

    pub fn summary(&self) -> String {
        let with = match &self.context {
            KillContext::Weapon => "weapon".to_string(),
            KillContext::Ability(id) => id.clone(),
            KillContext::Ultimate(id) => format!("{} (ultimate)", id),
        };
        let headshot = if self.headshot { " [headshot]" } else { "" };
        format!(
            "{:>6.2}s  {} -> {} with {}{}",
            self.time, self.killer_name, self.victim_name, with, headshot
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillFeed {
    capacity: usize,
    entries: VecDeque<KillFeedEntry>,
    total: usize,
}

impl KillFeed {
    pub fn new(capacity: usize) -> Self {
        KillFeed {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            total: 0,
        }
    }

    /// Add an entry, dropping the oldest once full
    pub fn push(&mut self, entry: KillFeedEntry) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Visible entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &KillFeedEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&KillFeedEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kills recorded since creation, including ones no longer visible
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(victim: u32) -> KillFeedEntry {
        KillFeedEntry {
            killer: EntityId(1),
            killer_name: "Soldier".into(),
            victim: EntityId(victim),
            victim_name: format!("Bot {}", victim),
            friendly: true,
            headshot: false,
            context: KillContext::Weapon,
            time: 1.0,
        }
    }

    #[test]
    fn test_context_selection() {
        assert_eq!(KillContext::new(None, false), KillContext::Weapon);
        assert_eq!(KillContext::new(None, true), KillContext::Weapon);
        assert_eq!(
            KillContext::new(Some("helix_rockets"), false),
            KillContext::Ability("helix_rockets".into())
        );
        assert_eq!(
            KillContext::new(Some("tactical_visor"), true),
            KillContext::Ultimate("tactical_visor".into())
        );
    }

    #[test]
    fn test_bounded() {
        let mut feed = KillFeed::new(2);
        feed.push(entry(2));
        feed.push(entry(3));
        feed.push(entry(4));

        assert_eq!(feed.len(), 2);
        assert_eq!(feed.total(), 3);
        let victims: Vec<_> = feed.entries().map(|e| e.victim).collect();
        assert_eq!(victims, vec![EntityId(3), EntityId(4)]);
    }

    #[test]
    fn test_summary() {
        let mut e = entry(2);
        e.headshot = true;
        e.context = KillContext::Ability("helix_rockets".into());
        let text = e.summary();
        assert!(text.contains("Soldier -> Bot 2 with helix_rockets"));
        assert!(text.contains("[headshot]"));
        assert!(!e.is_self_kill());
    }
}
