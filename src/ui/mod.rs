use crate::app_state::{App, FocusArea};
use crate::profile::{CharacterRow, CoreStat, RelicRow};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 顶部玩家信息
            Constraint::Min(0),    // 中间内容区域
            Constraint::Length(1), // 底部按键提示
        ])
        .split(f.size());

    render_top_bar(f, chunks[0], app);

    let middle_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(chunks[1]);

    render_character_list(f, middle_chunks[0], app);
    render_detail(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2]);
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let (uid, nickname, level) = app.player_line();
    let title_text = Line::from(vec![
        Span::styled(
            " HSR Profile ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" UID: {} ", uid)),
        Span::styled(
            format!(" {} ", nickname.unwrap_or("-")),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(
            " 开拓等级: {} ",
            level.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string())
        )),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_character_list(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .profile
        .characters
        .iter()
        .map(|c| {
            let level = c
                .character_level
                .map(|l| format!("Lv. {}", l))
                .unwrap_or_default();
            ListItem::new(format!("{} {}", c.character_name, level))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("角色 ({})", app.profile.characters.len()))
                .style(focus_style(app.focus_area == FocusArea::CharacterList)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    app.character_list_state.select(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut app.character_list_state);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("详细信息")
        .style(focus_style(app.focus_area == FocusArea::Detail));

    let Some(character) = app.selected_character() else {
        let p = Paragraph::new("没有角色数据").block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = character_lines(character);
    let relics = app.selected_relics();
    lines.push(Line::from(""));
    lines.push(section(&format!("--- 遗器 ({}) ---", relics.len())));
    for relic in relics {
        lines.extend(relic_lines(relic));
    }

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(p, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn or_dash<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

fn character_lines(c: &CharacterRow) -> Vec<Line<'static>> {
    let mut lines = vec![
        section(&format!("--- {} ---", c.character_name)),
        field("Character ID", or_dash(c.character_id.as_deref())),
        field("Level", or_dash(c.character_level)),
        field("Element", or_dash(c.element.as_deref())),
        field("Light Cone", or_dash(c.light_cone.as_deref())),
        field("LC Level", or_dash(c.light_cone_level)),
        Line::from(""),
        section("--- 属性 ---"),
    ];
    let stats: Vec<Span> = CoreStat::ALL
        .iter()
        .map(|s| Span::raw(format!("{}: {}   ", s.key(), c.stat(*s))))
        .collect();
    lines.push(Line::from(stats));
    lines
}

fn relic_lines(r: &RelicRow) -> Vec<Line<'static>> {
    let rarity = r.rarity.map(|x| format!("{}★ ", x)).unwrap_or_default();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} · {}{}",
                or_dash(r.slot.as_deref()),
                rarity,
                or_dash(r.set_name.as_deref())
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        field(
            "Main Stat",
            format!("{} = {}", or_dash(r.main_stat_name.as_deref()), r.main_stat_value),
        ),
    ];
    for sub in r.populated_substats() {
        lines.push(field(
            "  Substat",
            format!("{} ({})", or_dash(sub.name.as_deref()), sub.value),
        ));
    }
    lines.push(Line::from(Span::styled(
        format!("Number of substats: {}", r.num_substats),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_bottom_bar(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " ↑/↓ 选择角色  →/Enter 详情  ← 返回列表  PgUp/PgDn 滚动  q 退出",
        Style::default().fg(Color::DarkGray),
    )]));
    f.render_widget(hint, area);
}
