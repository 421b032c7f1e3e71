use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    // 源数据中的位置，仅用于存储排序
    #[sea_orm(primary_key, auto_increment = false)]
    pub row_id: i32,
    pub uid: i64,
    pub nickname: Option<String>,
    pub level: Option<i64>,
    pub character_id: Option<String>,
    pub character_name: String,
    pub character_level: Option<i64>,
    pub element: Option<String>,
    pub light_cone: Option<String>,
    pub light_cone_level: Option<i64>,

    // 核心属性
    #[sea_orm(column_name = "HP")]
    pub hp: i64,
    #[sea_orm(column_name = "ATK")]
    pub atk: i64,
    #[sea_orm(column_name = "DEF")]
    pub def: i64,
    #[sea_orm(column_name = "SPD")]
    pub spd: i64,
    #[sea_orm(column_name = "CRIT Rate")]
    pub crit_rate: f64,
    #[sea_orm(column_name = "CRIT DMG")]
    pub crit_dmg: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
