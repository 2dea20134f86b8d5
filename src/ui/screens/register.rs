use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::register::parse_amount;
use crate::thai::{baht_text, format_amount};
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_form(f, chunks[0], app);
    render_preview(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let value_width = area.width.saturating_sub(26) as usize;
    let editing = app.input_mode == InputMode::Editing;

    let rows: Vec<Row> = FormField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_cursor = i == app.form_index;
            let raw = if is_cursor && editing {
                app.command_input.as_str()
            } else {
                app.value(*field)
            };
            let value = if raw.is_empty() && field.is_choice() {
                "< +/- to choose >".to_string()
            } else {
                truncate(raw, value_width)
            };
            let marker = if field.is_choice() { "\u{25b8} " } else { "  " };

            let style = if is_cursor {
                theme::selected_style()
            } else if raw.is_empty() {
                theme::dim_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{marker}{}", field.label())),
                Cell::from(value),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Length(24), Constraint::Min(10)];
    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(
                " New claim ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let amount = parse_amount(app.value(FormField::Amount));
    let (amount_line, words_line) = match &amount {
        Ok(a) => (
            Span::styled(format!("{} บาท", format_amount(*a)), theme::amount_style()),
            match baht_text(*a) {
                Some(words) => Span::styled(words, theme::normal_style()),
                None => Span::styled("Amount too large", theme::over_budget_style()),
            },
        ),
        Err(e) => (
            Span::styled(format!("{e}"), theme::over_budget_style()),
            Span::raw(""),
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled("เลขที่", theme::dim_style())),
        Line::from(Span::styled(
            app.next_number.clone(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("วันที่", theme::dim_style())),
        Line::from(Span::styled(app.today_label(), theme::normal_style())),
        Line::from(""),
        Line::from(Span::styled("จำนวนเงิน", theme::dim_style())),
        Line::from(amount_line),
        Line::from(words_line),
    ];

    if let Some(last) = &app.last_registered {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("บันทึกล่าสุด", theme::dim_style())));
        lines.push(Line::from(Span::styled(
            format!("{}  {}", last.document_number, format_amount(last.amount)),
            theme::normal_style(),
        )));
        lines.push(Line::from(Span::styled(
            truncate(&last.subject, area.width.saturating_sub(4) as usize),
            theme::dim_style(),
        )));
    }

    let preview = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(
                " Preview ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(preview, area);
}
