use std::time::{Duration, Instant};

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::lifecycle::LivePopup;
use crate::models::Screen;
use crate::theme::{Theme, palette};

const CARD_WIDTH: u16 = 34;
const ENTRANCE: Duration = Duration::from_millis(550);
/// How far (columns, rows) a card travels during its entrance.
const ENTRANCE_TRAVEL: (f64, f64) = (10.0, 4.0);

pub fn render(f: &mut Frame, app: &App, now: Instant) {
    let theme = Theme::default();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(theme.root_bg)), area);

    if app.screen() == Screen::Debug {
        render_debug_title(f, app, &theme, area);
    }

    for popup in app.lifecycle().visible() {
        render_popup(f, popup, &theme, area, now);
    }

    match app.screen() {
        Screen::Welcome => render_welcome(f, app, &theme, area),
        Screen::Debug => render_debug_panel(f, app, &theme, area),
        Screen::Stream => {
            let hint = Paragraph::new("q quit")
                .alignment(Alignment::Right)
                .style(theme.footer);
            let line = Rect {
                y: area.bottom().saturating_sub(1),
                height: area.height.min(1),
                ..area
            };
            f.render_widget(hint, line);
        }
    }
}

/// Card height for `text` wrapped into `inner_width` columns.
fn card_height(text: &str, has_author: bool, inner_width: u16) -> u16 {
    let width = Line::from(text).width().max(1) as u16;
    let text_rows = width.div_ceil(inner_width.max(1));
    // borders + header + text + author + progress
    2 + 1 + text_rows + u16::from(has_author) + 1
}

/// Where a card is drawn at `now`, before clipping to `area`.
pub fn popup_origin(popup: &LivePopup, area: Rect, now: Instant) -> (i32, i32) {
    let d = &popup.descriptor;
    let x = area.x as f64 + area.width as f64 * d.left / 100.0;
    let y = area.y as f64 + area.height as f64 * d.top / 100.0;

    let elapsed = now.saturating_duration_since(popup.shown_at);
    let t = (elapsed.as_secs_f64() / ENTRANCE.as_secs_f64()).min(1.0);
    let pull = (1.0 - t) * (1.0 - t);
    let (dx, dy) = d.direction.offset();
    let x = x + dx as f64 * ENTRANCE_TRAVEL.0 * pull;
    let y = y + dy as f64 * ENTRANCE_TRAVEL.1 * pull;
    (x.round() as i32, y.round() as i32)
}

fn clip(x: i32, y: i32, width: u16, height: u16, area: Rect) -> Option<Rect> {
    let left = x.max(area.x as i32);
    let top = y.max(area.y as i32);
    let right = (x + width as i32).min(area.right() as i32);
    let bottom = (y + height as i32).min(area.bottom() as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(left as u16, top as u16, (right - left) as u16, (bottom - top) as u16))
}

fn render_popup(f: &mut Frame, popup: &LivePopup, theme: &Theme, area: Rect, now: Instant) {
    let d = &popup.descriptor;
    let colours = palette(d.theme);
    let width = CARD_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2);
    let height = card_height(&d.text, d.author.is_some(), inner_width);

    let (x, y) = popup_origin(popup, area, now);
    let Some(rect) = clip(x, y, width, height, area) else {
        return;
    };

    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colours.border))
        .style(Style::default().bg(colours.body));

    let mut lines = vec![Line::from(Span::styled(
        " ".repeat(inner_width as usize),
        Style::default().bg(colours.header),
    ))];
    lines.push(
        Line::from(Span::styled(d.text.as_str(), theme.popup_text)).alignment(Alignment::Center),
    );
    if let Some(author) = &d.author {
        let signature = Span::styled(format!("—— {author}"), theme.popup_author);
        lines.push(Line::from(signature).alignment(Alignment::Right));
    }

    let filled = (inner_width as f64 * popup.remaining).round() as usize;
    let track = (inner_width as usize).saturating_sub(filled);
    let progress = Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(colours.progress)),
        Span::styled("━".repeat(track), Style::default().fg(theme.progress_track)),
    ]);

    let inner = block.inner(rect);
    f.render_widget(block, rect);
    if inner.height == 0 {
        return;
    }
    let body = Rect { height: inner.height.saturating_sub(1), ..inner };
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
    if rect.height == height {
        let bar = Rect { y: inner.bottom().saturating_sub(1), height: 1, ..inner };
        f.render_widget(Paragraph::new(progress), bar);
    }
}

fn render_welcome(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let profile = app.profile();
    let dialog = centered_rect(50, 60, area);
    f.render_widget(Clear, dialog);

    let mut links = Vec::new();
    for route in app.registry().routes() {
        let emoji = &app.registry().profile(route).emoji;
        let style = if route == app.route() { theme.route_link_active } else { theme.route_link };
        links.push(Span::styled(format!(" {emoji} {route} "), style));
        links.push(Span::raw("  "));
    }
    links.pop();

    let lines = vec![
        Line::from(profile.emoji.as_str()),
        Line::default(),
        Line::from(Span::styled(profile.title.as_str(), theme.welcome_title)),
        Line::from(Span::styled(profile.subtitle.as_str(), theme.welcome_subtitle)),
        Line::default(),
        Line::from(Span::styled(profile.description.as_str(), Style::default().fg(theme.text))),
        Line::from(Span::styled("按 Enter 开始吧~", Style::default().fg(theme.text_secondary))),
        Line::default(),
        Line::from(Span::styled(format!("  {}  ", profile.button_text), theme.button)),
        Line::default(),
        Line::from(links),
        Line::from(Span::styled("←/→ switch route · q quit", theme.footer)),
    ];

    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(theme.welcome_border),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, dialog);
}

fn render_debug_title(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let title = vec![
        Line::from(Span::styled("✨ 弹窗演示", bold.fg(theme.text))),
        Line::from(vec![
            Span::styled("当前路由: ", Style::default().fg(theme.text_secondary)),
            Span::styled(format!("/{}", app.route()), bold.fg(theme.text_highlight)),
        ]),
    ];
    let rect = centered_rect(60, 10, area);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), rect);
}

fn render_debug_panel(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let height = area.height.min(3);
    let panel = Rect {
        x: area.x + area.width / 10,
        y: area.bottom().saturating_sub(height + 1),
        width: area.width - area.width / 5,
        height,
    };
    f.render_widget(Clear, panel);

    let mut spans = Vec::new();
    for route in app.registry().routes() {
        let style = if route == app.route() { theme.route_link_active } else { theme.route_link };
        spans.push(Span::styled(format!(" {route} "), style));
        spans.push(Span::raw(" "));
    }
    let button = Style::default().fg(Color::White);
    let toggle = if app.is_auto_spawning() {
        Span::styled(" [s] 停止 ", button.bg(Color::Rgb(239, 68, 68)))
    } else {
        Span::styled(" [s] 开始 ", button.bg(Color::Rgb(34, 197, 94)))
    };
    spans.extend([
        Span::raw("│ "),
        Span::styled(" [a] 添加弹窗 ", button.bg(Color::Rgb(59, 130, 246))),
        Span::raw(" "),
        toggle,
        Span::raw(" "),
        Span::styled(" [c] 清空 ", button.bg(theme.dim_bg)),
        Span::raw(" "),
        Span::styled(
            format!(" 弹窗: {} ", app.lifecycle().len()),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);

    let para = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ←/→ route · q quit ")
                .style(theme.panel_border),
        )
        .alignment(Alignment::Center);
    f.render_widget(para, panel);
}

/// The middle `percent_x` by `percent_y` of `r`. Percentages above 100 take all of `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let band = |direction: Direction, percent: u16, area: Rect| {
        let percent = percent.min(100);
        let margin = (100 - percent) / 2;
        Layout::default()
            .direction(direction)
            .constraints([
                Constraint::Percentage(margin),
                Constraint::Percentage(percent),
                Constraint::Percentage(margin),
            ])
            .split(area)[1]
    };
    band(Direction::Horizontal, percent_x, band(Direction::Vertical, percent_y, r))
}
