use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::thai::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{gauge_ratio, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Length(3), // Target gauge
            Constraint::Min(10),   // Charts
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_target_gauge(f, chunks[1], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_breakdown(f, charts[0], " By Category ", &app.summary.by_category);
    render_breakdown(f, charts[1], " By Faculty ", &app.summary.by_faculty);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let period = format!("{} {}", app.kind.label(), app.year);
    render_card(
        f,
        cards[0],
        "Claimed",
        format_amount(app.summary.total_spent),
        theme::ACCENT,
        Some(format!("{} claims", app.summary.record_count)),
    );

    match app.target {
        Some(target) => {
            let status = app.summary.against(target);
            let over = status.remaining < Decimal::ZERO;
            render_card(
                f,
                cards[1],
                "Target",
                format_amount(target),
                theme::TEXT,
                Some(period),
            );
            render_card(
                f,
                cards[2],
                if over { "Over by" } else { "Remaining" },
                format_amount(status.remaining.abs()),
                if over { theme::ALERT } else { theme::OK },
                None,
            );
            render_card(
                f,
                cards[3],
                "Used",
                status.percent_label(),
                theme::usage_color(gauge_ratio(status.percent_used), over),
                None,
            );
        }
        None => {
            render_card(
                f,
                cards[1],
                "Target",
                "not set".to_string(),
                theme::TEXT_DIM,
                Some(period),
            );
            render_card(f, cards[2], "Remaining", "-".to_string(), theme::TEXT_DIM, None);
            render_card(
                f,
                cards[3],
                "Years on file",
                app.years.len().to_string(),
                theme::TEXT,
                app.years.first().map(|y| format!("latest {y}")),
            );
        }
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_target_gauge(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style());

    let Some(target) = app.target else {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!(
                "No target for {} {}. Set one with :target <amount>",
                app.kind.label(),
                app.year
            ),
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let status = app.summary.against(target);
    let ratio = gauge_ratio(status.percent_used);
    let over = status.remaining < Decimal::ZERO;
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(theme::usage_color(ratio, over)))
        .ratio(ratio)
        .label(format!(
            "{} / {} ({})",
            format_amount(status.spent),
            format_amount(status.target),
            status.percent_label()
        ));
    f.render_widget(gauge, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, title: &str, groups: &[(String, Decimal)]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if groups.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No claims in this year",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = groups
        .iter()
        .take(12)
        .map(|(name, amt)| {
            let val = amt.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .label(Line::from(truncate(name, 24)))
                .text_value(format_amount(*amt))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::BASE)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
