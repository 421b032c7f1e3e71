use crate::profile::{CharacterRow, NormalizedProfile, RelicRow};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    CharacterList, // 焦点在左侧角色列表
    Detail,        // 焦点在右侧详情
}

pub struct App {
    pub uid: i64,
    pub profile: NormalizedProfile,
    pub focus_area: FocusArea,
    pub selected_index: usize,
    pub character_list_state: ListState,
    pub detail_scroll: u16,
}

impl App {
    pub fn new(uid: i64, profile: NormalizedProfile) -> App {
        App {
            uid,
            profile,
            focus_area: FocusArea::CharacterList,
            selected_index: 0,
            character_list_state: {
                let mut s = ListState::default();
                s.select(Some(0));
                s
            },
            detail_scroll: 0,
        }
    }

    /// 玩家信息取自第一行角色记录；没有角色时只有 UID
    pub fn player_line(&self) -> (i64, Option<&str>, Option<i64>) {
        match self.profile.characters.first() {
            Some(c) => (c.uid, c.nickname.as_deref(), c.level),
            None => (self.uid, None, None),
        }
    }

    pub fn selected_character(&self) -> Option<&CharacterRow> {
        self.profile.characters.get(self.selected_index)
    }

    pub fn selected_relics(&self) -> Vec<&RelicRow> {
        match self.selected_character() {
            Some(c) => self.profile.relics_for(&c.character_name).collect(),
            None => Vec::new(),
        }
    }

    pub fn clamp_selection(&mut self) {
        if self.selected_index >= self.profile.characters.len() {
            self.selected_index = self.profile.characters.len().saturating_sub(1);
        }
        self.character_list_state.select(Some(self.selected_index));
    }

    fn select(&mut self, index: usize) {
        if index != self.selected_index {
            self.selected_index = index;
            self.detail_scroll = 0; // 切换角色时重置滚动
        }
        self.clamp_selection();
    }

    /// 返回 true 表示退出
    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus_area = FocusArea::CharacterList;
                false
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                self.focus_area = FocusArea::Detail;
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.focus_area == FocusArea::Detail {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else if self.selected_index > 0 {
                    self.select(self.selected_index - 1);
                }
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus_area == FocusArea::Detail {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                } else if self.selected_index + 1 < self.profile.characters.len() {
                    self.select(self.selected_index + 1);
                }
                false
            }
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(10);
                false
            }
            KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(10);
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{normalize, RawProfile};
    use serde_json::json;

    fn app() -> App {
        let raw: RawProfile = serde_json::from_value(json!({
            "player": { "uid": 9, "nickname": "P", "level": 70 },
            "characters": [{ "name": "A" }, { "name": "B" }],
            "relics": [
                { "character_name": "B", "slot": "Head" },
                { "character_name": "A", "slot": "Hands" },
                { "character_name": "B", "slot": "Feet" }
            ]
        }))
        .unwrap();
        App::new(9, normalize(&raw).profile)
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut app = app();
        assert!(!app.handle_key_event(KeyCode::Up));
        assert_eq!(app.selected_index, 0);
        app.handle_key_event(KeyCode::Down);
        app.handle_key_event(KeyCode::Down);
        assert_eq!(app.selected_index, 1);
        assert!(app.handle_key_event(KeyCode::Char('q')));
    }

    #[test]
    fn relics_follow_selected_character() {
        let mut app = app();
        let slots: Vec<_> = app.selected_relics().iter().map(|r| r.slot.clone()).collect();
        assert_eq!(slots, vec![Some("Hands".to_string())]);

        app.handle_key_event(KeyCode::Down);
        let slots: Vec<_> = app.selected_relics().iter().map(|r| r.slot.clone()).collect();
        assert_eq!(
            slots,
            vec![Some("Head".to_string()), Some("Feet".to_string())]
        );
    }

    #[test]
    fn detail_scroll_resets_on_switch() {
        let mut app = app();
        app.handle_key_event(KeyCode::Right);
        app.handle_key_event(KeyCode::PageDown);
        assert_eq!(app.detail_scroll, 10);
        app.handle_key_event(KeyCode::Left);
        app.handle_key_event(KeyCode::Down);
        assert_eq!(app.detail_scroll, 0);
    }

    #[test]
    fn empty_profile_uses_requested_uid() {
        let app = App::new(5, NormalizedProfile::default());
        assert_eq!(app.player_line(), (5, None, None));
        assert!(app.selected_character().is_none());
        assert!(app.selected_relics().is_empty());
    }
}
