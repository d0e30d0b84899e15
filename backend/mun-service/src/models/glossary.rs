//! Procedure glossary shown to delegates

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GlossaryTerm {
    pub term: &'static str,
    pub definition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlossarySection {
    pub title: &'static str,
    pub terms: Vec<GlossaryTerm>,
}

fn term(term: &'static str, definition: &'static str) -> GlossaryTerm {
    GlossaryTerm { term, definition }
}

pub fn glossary() -> Vec<GlossarySection> {
    vec![
        GlossarySection {
            title: "Points",
            terms: vec![
                term(
                    "Point of Information",
                    "A question directed to the speaker",
                ),
                term(
                    "Point of Order",
                    "Raised when parliamentary procedure is not being followed",
                ),
                term(
                    "Point of Personal Privilege",
                    "Raised when there are issues affecting delegate comfort",
                ),
            ],
        },
        GlossarySection {
            title: "Motions",
            terms: vec![
                term("Open Debate", "Begin formal debate on a topic"),
                term("Close Debate", "End debate and move to voting"),
                term("Extend Debate", "Continue discussion beyond the time limit"),
                term("Suspend Debate", "Temporarily halt formal debate"),
            ],
        },
        GlossarySection {
            title: "Resolutions",
            terms: vec![
                term(
                    "Draft Resolution",
                    "Initial proposal addressing the committee topic",
                ),
                term("Amendment", "Proposed changes to a draft resolution"),
                term(
                    "Preambular Clauses",
                    "Background information and justification",
                ),
                term(
                    "Operative Clauses",
                    "Specific actions the committee recommends",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_in_display_order() {
        let titles: Vec<_> = glossary().iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Points", "Motions", "Resolutions"]);
    }

    #[test]
    fn every_term_has_a_definition() {
        let sections = glossary();
        assert_eq!(sections.iter().map(|s| s.terms.len()).sum::<usize>(), 11);
        assert!(sections
            .iter()
            .flat_map(|s| &s.terms)
            .all(|t| !t.definition.is_empty()));
    }
}
