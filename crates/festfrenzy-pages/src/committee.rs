//! The college committee catalogue shown on the events page.
//!
//! Entries must match organizer account names exactly: filtering compares
//! an event's organizer name against the selected entry.

/// One accordion section of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitteeGroup {
    pub category: &'static str,
    pub committees: &'static [&'static str],
}

pub const COMMITTEES: &[CommitteeGroup] = &[
    CommitteeGroup {
        category: "Technical Committees",
        committees: &[
            "SPark",
            "IEEE CS",
            "Astrophysics Club",
            "IEEE",
            "IETE",
            "ACSES",
            "IEEE AESS",
            "CSI",
        ],
    },
    CommitteeGroup {
        category: "Cultural Committees",
        committees: &["Speakers' Club", "MUDRA", "FEC", "Oculus"],
    },
    CommitteeGroup {
        category: "Social & Other",
        committees: &[
            "SPCG", "Rotaract", "Ecell", "SDC", "NISP", "WIE", "DRC", "Enactus", "SURAKSHA",
        ],
    },
    CommitteeGroup {
        category: "Sports Committees",
        committees: &["Sports"],
    },
    CommitteeGroup {
        category: "Departmental",
        committees: &["FETS"],
    },
];

/// The category a committee is listed under.
pub fn category_of(committee: &str) -> Option<&'static str> {
    COMMITTEES
        .iter()
        .find(|group| group.committees.contains(&committee))
        .map(|group| group.category)
}
