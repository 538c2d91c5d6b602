use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "WATER-SAVING TIPS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Small actions that make a big difference".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let tabs = Tabs::new(app.tip_categories().iter().map(|c| c.as_str()))
        .select(app.selected_category())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(tabs, chunks[1]);

    let tips = app.visible_tips();
    let count = Paragraph::new(format!("{} tips", tips.len()))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(count, chunks[2]);

    let list = Paragraph::new(super::result::tip_lines(&tips))
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((app.tips_scroll() * 3) as u16, 0));
    frame.render_widget(list, chunks[3]);

    super::render_controls(
        frame,
        chunks[4],
        "h/l category  ·  j/k scroll  ·  esc back  ·  q quit",
    );
}
