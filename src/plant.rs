// ---------------- 数据集 ----------------
// plants.json: 由 `plantcards import` 生成，启动时整体载入，之后只读

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FrictionFire {
    #[serde(default)]
    pub spindle: bool,
    #[serde(default)]
    pub hearth: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tinder {
    #[serde(default)]
    pub usable: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Cordage {
    #[serde(default)]
    pub usable: bool,
    #[serde(default)]
    pub material: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Wood {
    #[serde(default)]
    pub usable: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Edibility {
    #[serde(default)]
    pub edible_parts: Vec<String>,
    #[serde(default)]
    pub preparation: String,
    #[serde(default)]
    pub cautions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Medicinal {
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub preparation: String,
    #[serde(default)]
    pub cautions: String,
}

/// 一张卡片。没有独立 id 字段，`common_name` 即身份键
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlantRecord {
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub friction_fire: FrictionFire,
    #[serde(default)]
    pub tinder: Tinder,
    #[serde(default)]
    pub cordage: Cordage,
    #[serde(default)]
    pub wood: Wood,
    #[serde(default)]
    pub edibility: Edibility,
    #[serde(default)]
    pub medicinal: Medicinal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PlantRecord {
    pub fn same_card(&self, other: &PlantRecord) -> bool {
        self.common_name == other.common_name
    }

    // 背面展示用："Spindle, Hearth" / "Spindle" / ""
    pub fn friction_fire_parts(&self) -> String {
        let mut parts = Vec::new();
        if self.friction_fire.spindle {
            parts.push("Spindle");
        }
        if self.friction_fire.hearth {
            parts.push("Hearth");
        }
        parts.join(", ")
    }
}

pub fn load_dataset(path: &Path) -> Result<Vec<PlantRecord>> {
    if !path.exists() {
        let tip = format!(
            "dataset not found: {}\nhint: pass --file data/plants.json, set PLANTCARDS_DATA, or run `plantcards import` first",
            path.display()
        );
        return Err(anyhow::anyhow!(tip));
    }
    let s = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let plants = parse_dataset(&s)
        .with_context(|| format!("failed to parse dataset: {}", path.display()))?;
    info!(path = %path.display(), count = plants.len(), "dataset loaded");
    Ok(plants)
}

pub fn parse_dataset(s: &str) -> Result<Vec<PlantRecord>> {
    let plants: Vec<PlantRecord> = serde_json::from_str(s).context("invalid plants JSON")?;
    Ok(plants)
}
