use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::{
    app::App,
    category::Category,
    deck::{count_matching, total_for_selection},
    plant::PlantRecord,
    session::{PhaseKind, Snapshot},
};

const DASH: &str = "—";

pub fn ui(f: &mut Frame, app: &mut App) {
    // 顶栏 + 主区 + 底栏
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, v[0], app);
    match app.session.phase().kind() {
        PhaseKind::Setup => draw_setup(f, v[1], app),
        PhaseKind::Studying | PhaseKind::MissedReview => draw_card(f, v[1], app),
        PhaseKind::Complete => draw_summary(f, v[1], app),
    }
    draw_footer(f, v[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let bg = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(th.bar_bg));
    f.render_widget(bg, area);

    let snap = app.session.snapshot();
    let selected = app
        .session
        .selected()
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");
    let phase = match snap.kind {
        PhaseKind::Setup => "setup",
        PhaseKind::Studying => "studying",
        PhaseKind::MissedReview => "missed review",
        PhaseKind::Complete => "complete",
    };
    let segs = vec![
        Span::styled(
            " Plant Flashcards ",
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | phase:", Style::default().fg(th.muted)),
        Span::styled(phase, Style::default().fg(th.fg)),
        Span::styled(" | shuffle:", Style::default().fg(th.muted)),
        Span::styled(
            if app.session.shuffle() { "ON" } else { "OFF" },
            Style::default().fg(if app.session.shuffle() {
                th.good
            } else {
                th.muted
            }),
        ),
        Span::styled(" | missed:", Style::default().fg(th.muted)),
        Span::styled(format!("{}", snap.missed), Style::default().fg(th.warn)),
        Span::styled(" | ", Style::default().fg(th.muted)),
        Span::styled(
            fit_width(&selected, (area.width as usize).saturating_sub(60)),
            Style::default().fg(th.fg),
        ),
    ];
    let para = Paragraph::new(Line::from(segs)).style(Style::default().bg(th.bar_bg).fg(th.fg));
    f.render_widget(para, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let bg = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(th.bar_bg));
    f.render_widget(bg, area);
    let line = if let Some(msg) = &app.status {
        Line::from(Span::styled(format!(" {msg}"), Style::default().fg(th.warn)))
    } else {
        let tips = match app.session.phase().kind() {
            PhaseKind::Setup => {
                " [q]quit  [j/k]move  [Space]toggle  [1-6]categories  [s]shuffle  [Enter]start "
            }
            PhaseKind::Studying | PhaseKind::MissedReview => {
                " [q]quit  [f]flip  [m]missed  [n/→]next  [r/Esc]reset "
            }
            PhaseKind::Complete => " [q]quit  [Enter]restart  [r/Esc]choose new categories ",
        };
        Line::from(Span::styled(tips, Style::default().fg(th.muted)))
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.bar_bg)),
        area,
    );
}

fn draw_setup(f: &mut Frame, area: Rect, app: &mut App) {
    let th = app.theme;
    let h = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(Category::ALL.len() as u16 + 2), Constraint::Min(3)])
        .split(area);

    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|c| {
            let order = app.session.selected().iter().position(|s| s == c);
            let mark = if order.is_some() { "[x]" } else { "[ ]" };
            let n = count_matching(&app.plants, *c);
            let mut spans = vec![
                Span::styled(format!("{mark} "), Style::default().fg(th.accent)),
                Span::styled(c.label(), Style::default().fg(th.fg)),
                Span::styled(format!("  ({n})"), Style::default().fg(th.muted)),
            ];
            if let Some(i) = order {
                spans.push(Span::styled(
                    format!("  #{}", i + 1),
                    Style::default().fg(th.info),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(" Study Settings ", Style::default().fg(th.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(th.muted)),
        )
        .highlight_style(Style::default().bg(th.selection_bg))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, h[0], &mut app.cursor);

    let total = total_for_selection(&app.plants, app.session.selected());
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Shuffle cards: ", Style::default().fg(th.muted)),
            Span::styled(
                if app.session.shuffle() { "on" } else { "off" },
                Style::default().fg(th.fg),
            ),
        ]),
        Line::from(vec![
            Span::styled("Total cards available: ", Style::default().fg(th.muted)),
            Span::styled(
                format!("{total}"),
                Style::default().fg(th.fg).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    if total > 0 {
        lines.push(Line::from(Span::styled(
            "Select categories and settings, then press Enter to start.",
            Style::default().fg(th.fg),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "No cards for the current selection.",
            Style::default().fg(th.warn),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), h[1]);
}

fn draw_card(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let snap = app.session.snapshot();
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(2)])
        .split(area);

    let (pos, len) = snap.progress.unwrap_or((0, 0));
    let head = vec![
        Line::from(vec![
            Span::styled("Mode: ", Style::default().fg(th.muted)),
            Span::styled(
                snap.mode_label.unwrap_or(""),
                Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Card {pos} of {len}"),
            Style::default().fg(th.muted),
        )),
    ];
    f.render_widget(Paragraph::new(head), v[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.muted));
    let body = card_lines(&snap, app);
    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(th.fg)),
        v[1],
    );

    let mut foot = vec![Line::from(Span::styled(
        if snap.flipped {
            "[f] show front   [m] missed   [n] next"
        } else {
            "[f] flip   [m] missed   [n] next"
        },
        Style::default().fg(th.info),
    ))];
    if snap.review_hint {
        foot.push(Line::from(Span::styled(
            "Missed cards will be reviewed after all selected categories finish.",
            Style::default().fg(th.muted),
        )));
    }
    f.render_widget(Paragraph::new(foot), v[2]);
}

fn card_lines<'a>(snap: &Snapshot<'a>, app: &App) -> Vec<Line<'a>> {
    let th = app.theme;
    let Some(card) = snap.card else {
        return vec![Line::from("No card loaded.")];
    };
    if !snap.flipped {
        // 正面：只有图片（终端里显示链接）或占位
        return match &card.image_url {
            Some(url) => vec![
                Line::from(Span::styled("Image", Style::default().fg(th.muted))),
                Line::from(Span::raw(url.as_str())),
            ],
            None => vec![
                Line::from(""),
                Line::from("No image yet for this card.").alignment(Alignment::Center),
                Line::from(Span::styled(
                    "Flip to reveal the plant name and details.",
                    Style::default().fg(th.muted),
                ))
                .alignment(Alignment::Center),
            ],
        };
    }
    back_fields(card)
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| match i {
            0 => Line::from(Span::styled(
                value,
                Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
            )),
            1 => Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            _ => Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(th.muted)),
                Span::raw(value),
            ]),
        })
        .collect()
}

/// 背面的 (标签, 内容)；前两项是名称与学名，空值一律显示 "—"
pub fn back_fields(p: &PlantRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Name", or_dash(&p.common_name)),
        ("Scientific Name", or_dash(&p.scientific_name)),
        ("Uses", join_or_dash(&p.uses)),
        ("Edible Parts", join_or_dash(&p.edibility.edible_parts)),
        ("Medicinal Uses", join_or_dash(&p.medicinal.uses)),
        ("Cautions", or_dash(&p.edibility.cautions)),
        ("Friction Fire", or_dash(&p.friction_fire_parts())),
    ]
}

fn or_dash(s: &str) -> String {
    if s.trim().is_empty() {
        DASH.to_string()
    } else {
        s.to_string()
    }
}

fn join_or_dash(v: &[String]) -> String {
    or_dash(&v.join(", "))
}

fn draw_summary(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let sum = app.session.summary(&app.plants);
    let rect = centered_rect(60, 50, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(
            " Session Complete ",
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.muted));
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(th.muted)),
            Span::styled(value, Style::default().fg(th.fg).add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        row("Categories Studied", sum.categories.join(", ")),
        row("Total Cards Available", sum.total_available.to_string()),
        row("Missed Cards", sum.missed.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Restart Session   [r] Choose New Categories   [q] Quit",
            Style::default().fg(th.info),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}

/// 按显示宽度截断，超出部分以 … 结尾
pub fn fit_width(s: &str, maxw: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= maxw {
        return s.to_string();
    }
    if maxw == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if w + cw + 1 > maxw {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push('…');
    out
}
