use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub row_id: i32,
    pub uid: i64,
    pub character_name: String,
    pub slot: Option<String>,
    pub set_name: Option<String>,
    pub rarity: Option<i64>,
    pub main_stat_name: Option<String>,
    pub main_stat_value: Option<f64>,
    pub main_stat_is_percent: bool,

    // 固定 4 个副属性槽位
    pub substat1_name: Option<String>,
    pub substat1_value: Option<f64>,
    pub substat1_is_percent: Option<bool>,
    pub substat2_name: Option<String>,
    pub substat2_value: Option<f64>,
    pub substat2_is_percent: Option<bool>,
    pub substat3_name: Option<String>,
    pub substat3_value: Option<f64>,
    pub substat3_is_percent: Option<bool>,
    pub substat4_name: Option<String>,
    pub substat4_value: Option<f64>,
    pub substat4_is_percent: Option<bool>,

    pub num_substats: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
