// field_skills.rs
// Field skill (HM and overworld utility move) catalog with the version
// groups each skill exists in.

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSkill {
    pub id: &'static str,
    pub label: &'static str,
    /// Remote API move identifier
    pub move_name: &'static str,
    /// Version groups where this skill is available
    pub version_groups: &'static [&'static str],
    /// First generation the skill appeared in
    pub generation: u32,
}

pub const FIELD_SKILLS: &[FieldSkill] = &[
    FieldSkill {
        id: "cut",
        label: "Cut",
        move_name: "cut",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "fly",
        label: "Fly",
        move_name: "fly",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "surf",
        label: "Surf",
        move_name: "surf",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "strength",
        label: "Strength",
        move_name: "strength",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "flash",
        label: "Flash",
        move_name: "flash",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "whirlpool",
        label: "Whirlpool",
        move_name: "whirlpool",
        version_groups: &["gold-silver", "crystal", "heartgold-soulsilver"],
        generation: 2,
    },
    FieldSkill {
        id: "waterfall",
        label: "Waterfall",
        move_name: "waterfall",
        version_groups: &[
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 2,
    },
    FieldSkill {
        id: "rock-smash",
        label: "Rock Smash",
        move_name: "rock-smash",
        version_groups: &[
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 2,
    },
    FieldSkill {
        id: "headbutt",
        label: "Headbutt",
        move_name: "headbutt",
        version_groups: &["gold-silver", "crystal", "heartgold-soulsilver"],
        generation: 2,
    },
    FieldSkill {
        id: "dive",
        label: "Dive",
        move_name: "dive",
        version_groups: &[
            "ruby-sapphire",
            "emerald",
            "black-white",
            "black-2-white-2",
        ],
        generation: 3,
    },
    FieldSkill {
        id: "rock-climb",
        label: "Rock Climb",
        move_name: "rock-climb",
        version_groups: &["diamond-pearl", "platinum", "heartgold-soulsilver"],
        generation: 4,
    },
    FieldSkill {
        id: "defog",
        label: "Defog",
        move_name: "defog",
        version_groups: &["diamond-pearl", "platinum", "heartgold-soulsilver"],
        generation: 4,
    },
    FieldSkill {
        id: "dig",
        label: "Dig",
        move_name: "dig",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "teleport",
        label: "Teleport",
        move_name: "teleport",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 1,
    },
    FieldSkill {
        id: "sweet-scent",
        label: "Sweet Scent",
        move_name: "sweet-scent",
        version_groups: &[
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
            "black-white",
            "black-2-white-2",
        ],
        generation: 2,
    },
    FieldSkill {
        id: "milk-drink",
        label: "Milk Drink",
        move_name: "milk-drink",
        version_groups: &[
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
        ],
        generation: 2,
    },
    FieldSkill {
        id: "softboiled",
        label: "Softboiled",
        move_name: "softboiled",
        version_groups: &[
            "red-blue",
            "yellow",
            "gold-silver",
            "crystal",
            "ruby-sapphire",
            "emerald",
            "firered-leafgreen",
            "diamond-pearl",
            "platinum",
            "heartgold-soulsilver",
        ],
        generation: 1,
    },
];

pub fn skills_for_version_group(version_group: &str) -> Vec<&'static FieldSkill> {
    FIELD_SKILLS
        .iter()
        .filter(|skill| skill.version_groups.contains(&version_group))
        .collect()
}

pub fn skill_by_id(id: &str) -> Option<&'static FieldSkill> {
    FIELD_SKILLS.iter().find(|skill| skill.id == id)
}

pub fn skill_by_move_name(move_name: &str) -> Option<&'static FieldSkill> {
    FIELD_SKILLS.iter().find(|skill| skill.move_name == move_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_skill_by_id() {
        let surf = skill_by_id("surf").expect("surf is in the catalog");
        assert_eq!(surf.move_name, "surf");
        assert_eq!(surf.generation, 1);

        assert!(skill_by_id("fly-taxi").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = FIELD_SKILLS.iter().map(|skill| skill.id).collect();
        assert_eq!(ids.len(), FIELD_SKILLS.len());
    }

    #[test]
    fn test_skills_for_version_group() {
        let red_blue: Vec<&str> = skills_for_version_group("red-blue")
            .iter()
            .map(|skill| skill.id)
            .collect();

        assert!(red_blue.contains(&"cut"));
        assert!(red_blue.contains(&"surf"));
        // Waterfall only became a field skill in generation II
        assert!(!red_blue.contains(&"waterfall"));
        assert!(!red_blue.contains(&"rock-climb"));
    }

    #[test]
    fn test_later_groups_drop_retired_skills() {
        let black_white: Vec<&str> = skills_for_version_group("black-white")
            .iter()
            .map(|skill| skill.id)
            .collect();

        assert!(black_white.contains(&"surf"));
        assert!(!black_white.contains(&"cut"));
        assert!(!black_white.contains(&"flash"));
    }
}
