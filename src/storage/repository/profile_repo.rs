use crate::profile::{CharacterRow, DisplayValue, NormalizedProfile, RelicRow, SubstatSlot, Unit};
use crate::storage::entity::character_row::{
    self, ActiveModel as CharacterActiveModel, Entity as CharacterTable, Model as CharacterModel,
};
use crate::storage::entity::relic_row::{
    self, ActiveModel as RelicActiveModel, Entity as RelicTable, Model as RelicModel,
};
use log::info;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};

impl From<CharacterModel> for CharacterRow {
    fn from(model: CharacterModel) -> Self {
        Self {
            uid: model.uid,
            nickname: model.nickname,
            level: model.level,
            character_id: model.character_id,
            character_name: model.character_name,
            character_level: model.character_level,
            element: model.element,
            light_cone: model.light_cone,
            light_cone_level: model.light_cone_level,
            hp: model.hp,
            atk: model.atk,
            def: model.def,
            spd: model.spd,
            crit_rate: model.crit_rate,
            crit_dmg: model.crit_dmg,
        }
    }
}

fn substat_slot(name: Option<String>, value: Option<f64>, is_percent: Option<bool>) -> SubstatSlot {
    let unit = if is_percent.unwrap_or(false) {
        Unit::Percent
    } else {
        Unit::Flat
    };
    SubstatSlot {
        name,
        value: DisplayValue::from_stored(value, unit),
        is_percent,
    }
}

impl From<RelicModel> for RelicRow {
    fn from(model: RelicModel) -> Self {
        let main_unit = if model.main_stat_is_percent {
            Unit::Percent
        } else {
            Unit::Flat
        };
        Self {
            uid: model.uid,
            character_name: model.character_name,
            slot: model.slot,
            set_name: model.set_name,
            rarity: model.rarity,
            main_stat_name: model.main_stat_name,
            main_stat_value: DisplayValue::from_stored(model.main_stat_value, main_unit),
            main_stat_is_percent: model.main_stat_is_percent,
            substats: [
                substat_slot(
                    model.substat1_name,
                    model.substat1_value,
                    model.substat1_is_percent,
                ),
                substat_slot(
                    model.substat2_name,
                    model.substat2_value,
                    model.substat2_is_percent,
                ),
                substat_slot(
                    model.substat3_name,
                    model.substat3_value,
                    model.substat3_is_percent,
                ),
                substat_slot(
                    model.substat4_name,
                    model.substat4_value,
                    model.substat4_is_percent,
                ),
            ],
            num_substats: usize::try_from(model.num_substats).unwrap_or(0),
        }
    }
}

fn character_active_model(row_id: usize, row: &CharacterRow) -> CharacterActiveModel {
    CharacterActiveModel {
        row_id: Set(row_id as i32),
        uid: Set(row.uid),
        nickname: Set(row.nickname.clone()),
        level: Set(row.level),
        character_id: Set(row.character_id.clone()),
        character_name: Set(row.character_name.clone()),
        character_level: Set(row.character_level),
        element: Set(row.element.clone()),
        light_cone: Set(row.light_cone.clone()),
        light_cone_level: Set(row.light_cone_level),
        hp: Set(row.hp),
        atk: Set(row.atk),
        def: Set(row.def),
        spd: Set(row.spd),
        crit_rate: Set(row.crit_rate),
        crit_dmg: Set(row.crit_dmg),
    }
}

fn relic_active_model(row_id: usize, row: &RelicRow) -> RelicActiveModel {
    let [s1, s2, s3, s4] = &row.substats;
    RelicActiveModel {
        row_id: Set(row_id as i32),
        uid: Set(row.uid),
        character_name: Set(row.character_name.clone()),
        slot: Set(row.slot.clone()),
        set_name: Set(row.set_name.clone()),
        rarity: Set(row.rarity),
        main_stat_name: Set(row.main_stat_name.clone()),
        main_stat_value: Set(row.main_stat_value.as_f64()),
        main_stat_is_percent: Set(row.main_stat_is_percent),
        substat1_name: Set(s1.name.clone()),
        substat1_value: Set(s1.value.as_f64()),
        substat1_is_percent: Set(s1.is_percent),
        substat2_name: Set(s2.name.clone()),
        substat2_value: Set(s2.value.as_f64()),
        substat2_is_percent: Set(s2.is_percent),
        substat3_name: Set(s3.name.clone()),
        substat3_value: Set(s3.value.as_f64()),
        substat3_is_percent: Set(s3.is_percent),
        substat4_name: Set(s4.name.clone()),
        substat4_value: Set(s4.value.as_f64()),
        substat4_is_percent: Set(s4.is_percent),
        num_substats: Set(i32::try_from(row.num_substats).unwrap_or(i32::MAX)),
    }
}

pub struct ProfileRepository;

impl ProfileRepository {
    /// 在同一事务中整体替换角色表与遗器表，重复执行会覆盖旧数据。
    pub async fn replace_all(
        db: &DatabaseConnection,
        profile: &NormalizedProfile,
    ) -> Result<(), sea_orm::DbErr> {
        let txn = db.begin().await?;

        CharacterTable::delete_many().exec(&txn).await?;
        RelicTable::delete_many().exec(&txn).await?;

        // insert_many 对空集合会报错，需要跳过
        if !profile.characters.is_empty() {
            let models = profile
                .characters
                .iter()
                .enumerate()
                .map(|(i, row)| character_active_model(i, row));
            CharacterTable::insert_many(models).exec(&txn).await?;
        }
        if !profile.relics.is_empty() {
            let models = profile
                .relics
                .iter()
                .enumerate()
                .map(|(i, row)| relic_active_model(i, row));
            RelicTable::insert_many(models).exec(&txn).await?;
        }

        txn.commit().await?;
        info!(
            "已写入 {} 条角色记录, {} 条遗器记录",
            profile.characters.len(),
            profile.relics.len()
        );
        Ok(())
    }

    /// 读取两张表，按源顺序返回
    pub async fn load(db: &DatabaseConnection) -> Result<NormalizedProfile, sea_orm::DbErr> {
        let characters = CharacterTable::find()
            .order_by_asc(character_row::Column::RowId)
            .all(db)
            .await?
            .into_iter()
            .map(CharacterRow::from)
            .collect();
        let relics = RelicTable::find()
            .order_by_asc(relic_row::Column::RowId)
            .all(db)
            .await?
            .into_iter()
            .map(RelicRow::from)
            .collect();
        Ok(NormalizedProfile { characters, relics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{normalize, RawProfile};
    use crate::storage::connection::establish_connection;
    use sea_orm::{IdenStatic, Iterable};
    use serde_json::json;

    fn sample_profile() -> NormalizedProfile {
        let raw: RawProfile = serde_json::from_value(json!({
            "player": { "uid": 700712292, "nickname": "Trailblazer", "level": 60 },
            "characters": [
                { "character_id": 1005, "name": "Kafka", "level": 80, "element": "Lightning" },
                { "character_id": 1102, "name": "Seele", "level": 70, "element": "Quantum",
                  "light_cone": null, "light_cone_level": null }
            ],
            "stats": [{
                "character_name": "Kafka",
                "HP": 3456.7, "ATK": 2789.2, "DEF": 1012.9, "SPD": 134.5,
                "CRIT Rate": 0.243, "CRIT DMG": 0.872
            }],
            "relics": [
                {
                    "character_name": "Kafka", "slot": "Body", "set_name": "Thunder", "rarity": 5,
                    "main_stat_name": "ATK%", "main_stat_value": 0.518, "main_stat_is_percent": true,
                    "substats": [
                        { "name": "SPD", "value": 4.6, "is_percent": false },
                        { "name": "ATK%", "value": 0.0777, "is_percent": true }
                    ]
                },
                {
                    "character_name": "Seele", "slot": "Head", "set_name": "Genius", "rarity": 5,
                    "main_stat_name": "HP", "main_stat_value": 705.6, "main_stat_is_percent": false,
                    "substats": [
                        { "name": "A", "value": 1, "is_percent": false },
                        { "name": "B", "value": 2, "is_percent": false },
                        { "name": "C", "value": 3, "is_percent": false },
                        { "name": "D", "value": 4, "is_percent": false },
                        { "name": "E", "value": 5, "is_percent": false }
                    ]
                }
            ]
        }))
        .unwrap();
        normalize(&raw).profile
    }

    #[tokio::test]
    async fn replace_then_load_returns_same_rows() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        let profile = sample_profile();
        ProfileRepository::replace_all(&db, &profile).await.unwrap();

        let loaded = ProfileRepository::load(&db).await.unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.relics[1].num_substats, 5);
        assert!(loaded.relics[0].substats[3].is_padding());
    }

    #[tokio::test]
    async fn rerun_overwrites_previous_rows() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        let mut profile = sample_profile();
        ProfileRepository::replace_all(&db, &profile).await.unwrap();

        profile.characters.truncate(1);
        profile.relics.clear();
        ProfileRepository::replace_all(&db, &profile).await.unwrap();

        let loaded = ProfileRepository::load(&db).await.unwrap();
        assert_eq!(loaded.characters.len(), 1);
        assert!(loaded.relics.is_empty());
        assert_eq!(CharacterTable::find().all(&db).await.unwrap().len(), 1);
    }

    #[test]
    fn table_columns_follow_output_contract() {
        let characters: Vec<String> = character_row::Column::iter()
            .skip(1)
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(characters, CharacterRow::COLUMNS.map(String::from).to_vec());

        let relics: Vec<String> = relic_row::Column::iter()
            .skip(1)
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(relics, RelicRow::COLUMNS.map(String::from).to_vec());
    }
}
