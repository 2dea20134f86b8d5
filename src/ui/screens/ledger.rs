use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::thai::format_amount;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let records = app.visible_records();

    if records.is_empty() {
        let msg = if !app.search().is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No claims matching '{}'", app.search()),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No claims recorded yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Fill in the form on the Register tab to add one",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(
                " Ledger (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["เลขที่", "วันที่", "เรื่อง", "คณะ", "หมวด", "จำนวนเงิน"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .skip(app.ledger_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, rec)| {
            let style = if i == app.ledger_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(rec.document_number.clone()),
                Cell::from(format!("{}/{}/{}", rec.day, rec.month, rec.year)),
                Cell::from(truncate(&rec.subject, 40)),
                Cell::from(truncate(&rec.faculty, 22)),
                Cell::from(truncate(&rec.budget_category, 16)),
                Cell::from(Span::styled(
                    format_amount(rec.amount),
                    theme::amount_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(22),
        Constraint::Length(16),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(
                format!(
                    " Ledger ({}) {}",
                    records.len(),
                    if !app.search().is_empty() {
                        format!("search: '{}' ", app.search())
                    } else {
                        String::new()
                    }
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
