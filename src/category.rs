// ---------------- 分类 ----------------

use clap::ValueEnum;

use crate::plant::PlantRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    FrictionFire,
    Tinder,
    Cordage,
    Wood,
    Edibility,
    Medicinal,
}

impl Category {
    // 设置界面的展示顺序
    pub const ALL: [Category; 6] = [
        Category::FrictionFire,
        Category::Tinder,
        Category::Cordage,
        Category::Wood,
        Category::Edibility,
        Category::Medicinal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::FrictionFire => "friction_fire",
            Self::Tinder => "tinder",
            Self::Cordage => "cordage",
            Self::Wood => "wood",
            Self::Edibility => "edibility",
            Self::Medicinal => "medicinal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FrictionFire => "Friction Fire",
            Self::Tinder => "Tinder",
            Self::Cordage => "Cordage",
            Self::Wood => "Wood",
            Self::Edibility => "Edible Plants",
            Self::Medicinal => "Medicinal",
        }
    }

    /// 未知的 key 返回 None，调用方据此忽略
    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == s)
    }

    pub fn matches(&self, p: &PlantRecord) -> bool {
        match self {
            Self::FrictionFire => p.friction_fire.spindle || p.friction_fire.hearth,
            Self::Tinder => p.tinder.usable,
            Self::Cordage => p.cordage.usable,
            Self::Wood => p.wood.usable,
            Self::Edibility => !p.edibility.edible_parts.is_empty(),
            Self::Medicinal => !p.medicinal.uses.is_empty(),
        }
    }
}

/// 按字符串 key 判断；未知分类一律 false
pub fn matches_key(p: &PlantRecord, key: &str) -> bool {
    Category::from_key(key).is_some_and(|c| c.matches(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::{Cordage, Edibility, FrictionFire, Medicinal, Tinder, Wood};

    fn plant(name: &str) -> PlantRecord {
        PlantRecord {
            common_name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn friction_fire_needs_spindle_or_hearth() {
        let mut p = plant("Basswood");
        assert!(!Category::FrictionFire.matches(&p));
        p.friction_fire = FrictionFire {
            hearth: true,
            ..Default::default()
        };
        assert!(Category::FrictionFire.matches(&p));
        p.friction_fire = FrictionFire {
            spindle: true,
            ..Default::default()
        };
        assert!(Category::FrictionFire.matches(&p));
    }

    #[test]
    fn usable_flags_drive_tinder_cordage_wood() {
        let mut p = plant("Cedar");
        p.tinder = Tinder {
            usable: true,
            notes: "bark".into(),
        };
        p.cordage = Cordage {
            usable: true,
            material: "inner bark".into(),
        };
        assert!(Category::Tinder.matches(&p));
        assert!(Category::Cordage.matches(&p));
        assert!(!Category::Wood.matches(&p));
        p.wood = Wood {
            usable: true,
            notes: String::new(),
        };
        assert!(Category::Wood.matches(&p));
    }

    #[test]
    fn list_fields_must_be_non_empty() {
        let mut p = plant("Plantain");
        assert!(!Category::Edibility.matches(&p));
        assert!(!Category::Medicinal.matches(&p));
        p.edibility = Edibility {
            edible_parts: vec!["leaves".into()],
            ..Default::default()
        };
        p.medicinal = Medicinal {
            uses: vec!["poultice".into()],
            ..Default::default()
        };
        assert!(Category::Edibility.matches(&p));
        assert!(Category::Medicinal.matches(&p));
    }

    #[test]
    fn keys_round_trip_and_unknown_is_false() {
        for c in Category::ALL {
            assert_eq!(Category::from_key(c.key()), Some(c));
        }
        assert_eq!(Category::from_key("shelter"), None);
        let mut p = plant("Cattail");
        p.tinder.usable = true;
        assert!(matches_key(&p, "tinder"));
        assert!(!matches_key(&p, "shelter"));
    }
}
