//! Catalog configuration — the rank table and the mission catalog.
//!
//! Catalogs are loaded once at process start from the data/ directory and
//! shared read-only for the process lifetime. No catalog entry is ever
//! mutated. In tests, use GameConfig::default_test().

use crate::rank_table::RankTable;
use crate::types::{Money, Rank};
use serde::{Deserialize, Serialize};

/// One tier of the progression ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankTier {
    pub rank: Rank,
    pub name: String,
    /// Absolute savings amount that unlocks this tier. Cumulative against
    /// total_saved, never a per-tier delta.
    pub threshold: Money,
    pub points_reward: u32,
    #[serde(default)]
    pub cashback_reward: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
struct RankTableFile {
    tiers: Vec<RankTier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    DepositOnce,
    SetGoal,
    ReadTip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionParams {
    #[serde(default)]
    pub min_amount: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRewards {
    pub points: u32,
    #[serde(default)]
    pub water: Option<u32>,
    #[serde(default)]
    pub sun: Option<u32>,
}

/// A mission catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub kind: MissionKind,
    #[serde(default)]
    pub params: MissionParams,
    pub rewards: MissionRewards,
    /// Presentation hint, carried through untouched.
    #[serde(default)]
    pub icon_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MissionCatalogFile {
    missions: Vec<Mission>,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub ranks: RankTable,
    pub missions: Vec<Mission>,
}

impl GameConfig {
    /// Load from the data/ directory.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let rank_path = format!("{data_dir}/ranks/rank_table.json");
        let rank_content = std::fs::read_to_string(&rank_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {rank_path}: {e}"))?;
        let rank_file: RankTableFile = serde_json::from_str(&rank_content)?;
        let ranks = RankTable::new(rank_file.tiers)?;

        let mission_path = format!("{data_dir}/missions/mission_catalog.json");
        let mission_content = std::fs::read_to_string(&mission_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {mission_path}: {e}"))?;
        let mission_file: MissionCatalogFile = serde_json::from_str(&mission_content)?;

        log::info!(
            "config: loaded {} rank tiers, {} missions from {data_dir}",
            ranks.max_rank() + 1,
            mission_file.missions.len()
        );

        Ok(Self {
            ranks,
            missions: mission_file.missions,
        })
    }

    /// The reference catalog, built in code. Used by tests and as the
    /// documented default ladder.
    pub fn default_test() -> Self {
        let tiers = vec![
            RankTier {
                rank: 0,
                name: "Tierra Sola".into(),
                threshold: 0.0,
                points_reward: 0,
                cashback_reward: None,
            },
            RankTier {
                rank: 1,
                name: "Semilla".into(),
                threshold: 1.0,
                points_reward: 100,
                cashback_reward: None,
            },
            RankTier {
                rank: 2,
                name: "Planta Joven".into(),
                threshold: 1000.0,
                points_reward: 500,
                cashback_reward: None,
            },
            RankTier {
                rank: 3,
                name: "Arbusto".into(),
                threshold: 5000.0,
                points_reward: 1000,
                cashback_reward: None,
            },
            RankTier {
                rank: 4,
                name: "Árbol Fuerte".into(),
                threshold: 20000.0,
                points_reward: 2500,
                cashback_reward: None,
            },
            RankTier {
                rank: 5,
                name: "Árbol Frutal".into(),
                threshold: 50000.0,
                points_reward: 0,
                cashback_reward: Some(100.0),
            },
        ];

        let missions = vec![
            Mission {
                id: "set_goal_1".into(),
                title: "Establecer tu primera meta".into(),
                kind: MissionKind::SetGoal,
                params: MissionParams::default(),
                rewards: MissionRewards { points: 100, water: Some(5), sun: None },
                icon_color: Some("bg-yellow-200".into()),
            },
            Mission {
                id: "deposit_10".into(),
                title: "Deposita $10 pesos".into(),
                kind: MissionKind::DepositOnce,
                params: MissionParams { min_amount: Some(10.0) },
                rewards: MissionRewards { points: 2, water: Some(2), sun: None },
                icon_color: Some("bg-green-200".into()),
            },
            Mission {
                id: "deposit_50".into(),
                title: "¡Buen inicio! Deposita $50".into(),
                kind: MissionKind::DepositOnce,
                params: MissionParams { min_amount: Some(50.0) },
                rewards: MissionRewards { points: 10, water: Some(5), sun: None },
                icon_color: Some("bg-pink-200".into()),
            },
            Mission {
                id: "read_tip_1".into(),
                title: "Lee un tip financiero".into(),
                kind: MissionKind::ReadTip,
                params: MissionParams::default(),
                rewards: MissionRewards { points: 5, water: None, sun: None },
                icon_color: Some("bg-blue-200".into()),
            },
        ];

        Self {
            ranks: RankTable::new(tiers).expect("reference rank table is valid"),
            missions,
        }
    }
}
