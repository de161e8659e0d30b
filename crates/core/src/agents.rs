//! Static agent table and the fuzzy matcher for OCR'd agent names.
//!
//! The table is reference data deployed with the build; change it by
//! editing [`AGENTS`].
//!
//! Matching order:
//!
//! 1. Case-insensitive exact match on the canonical name.
//! 2. Every agent with at least one token contained in the lowercased input
//!    becomes a candidate. One candidate wins outright.
//! 3. Several candidates are scored by how many of their tokens appear in
//!    the input. The highest score wins; equal scores fall back to table
//!    order and the result is marked [`MatchKind::Scored`] with
//!    `ambiguous: true` so callers can surface it.

use serde::Serialize;

use crate::types::CrmId;

/// A sales agent known to the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agent {
    /// Canonical display name, as stored in VaultRE.
    pub name: &'static str,
    /// VaultRE staff id.
    pub vaultre_id: CrmId,
    /// Lowercase search tokens (first name, surname, nicknames).
    #[serde(skip)]
    pub tokens: &'static [&'static str],
}

pub static AGENTS: &[Agent] = &[
    Agent {
        name: "WENDY SQUIBB",
        vaultre_id: 30112,
        tokens: &["wendy", "squibb"],
    },
    Agent {
        name: "MICHAEL KNIGHT",
        vaultre_id: 30118,
        tokens: &["michael", "mick", "knight"],
    },
    Agent {
        name: "SARAH KNIGHT",
        vaultre_id: 30121,
        tokens: &["sarah", "knight"],
    },
    Agent {
        name: "JAMES HOLLOWAY",
        vaultre_id: 30125,
        tokens: &["james", "jim", "holloway"],
    },
    Agent {
        name: "EMMA CLARKE",
        vaultre_id: 30130,
        tokens: &["emma", "clarke"],
    },
    Agent {
        name: "DANIEL FOSTER",
        vaultre_id: 30134,
        tokens: &["daniel", "foster"],
    },
    Agent {
        name: "RACHEL BAKER",
        vaultre_id: 30139,
        tokens: &["rachel", "baker"],
    },
];

/// How an agent was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Input equals the canonical name (ignoring case).
    Exact,
    /// Exactly one agent shared a token with the input.
    SingleToken,
    /// Several candidates; the best token score won.
    Scored { score: usize, ambiguous: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentMatch<'a> {
    pub agent: &'a Agent,
    pub kind: MatchKind,
}

impl AgentMatch<'_> {
    /// True when the winner was picked by table order among equal scores.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.kind, MatchKind::Scored { ambiguous: true, .. })
    }
}

/// Match raw OCR text against the built-in [`AGENTS`] table.
pub fn match_agent(raw: &str) -> Option<AgentMatch<'static>> {
    match_agent_in(AGENTS, raw)
}

/// Match raw OCR text against an arbitrary agent table.
pub fn match_agent_in<'a>(agents: &'a [Agent], raw: &str) -> Option<AgentMatch<'a>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(agent) = agents.iter().find(|a| a.name.eq_ignore_ascii_case(trimmed)) {
        return Some(AgentMatch {
            agent,
            kind: MatchKind::Exact,
        });
    }

    let input = trimmed.to_lowercase();
    let candidates: Vec<&Agent> = agents
        .iter()
        .filter(|a| a.tokens.iter().any(|t| input.contains(t)))
        .collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(AgentMatch {
            agent: only,
            kind: MatchKind::SingleToken,
        }),
        many => {
            let scored: Vec<(&Agent, usize)> = many
                .iter()
                .map(|a| (*a, a.tokens.iter().filter(|t| input.contains(*t)).count()))
                .collect();

            // First-seen wins on equal scores, so only replace on strictly greater.
            let mut best = scored[0];
            for &(agent, score) in &scored[1..] {
                if score > best.1 {
                    best = (agent, score);
                }
            }
            let ties = scored.iter().filter(|(_, s)| *s == best.1).count();

            Some(AgentMatch {
                agent: best.0,
                kind: MatchKind::Scored {
                    score: best.1,
                    ambiguous: ties > 1,
                },
            })
        }
    }
}

/// Look up an agent by VaultRE staff id.
pub fn find_by_vaultre_id(id: CrmId) -> Option<&'static Agent> {
    AGENTS.iter().find(|a| a.vaultre_id == id)
}
