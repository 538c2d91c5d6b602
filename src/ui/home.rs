use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::quiz::POINTS_PER_CORRECT_ANSWER;

fn quiz_summary(questions: usize, seconds_per_question: u32) -> String {
    format!(
        "{} questions · {}s each · {} points per right answer",
        questions, seconds_per_question, POINTS_PER_CORRECT_ANSWER
    )
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let settings = app.settings();
    let questions = settings
        .total_questions
        .min(app.content().questions().len());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "OCEAN QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Ocean literacy & climate trivia".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(quiz_summary(questions, settings.seconds_per_question).fg(Color::Gray)),
        Line::from("Personalized water-saving tips at the end".fg(Color::Gray)),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
        Line::from(""),
        Line::from("t tips  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, super::centered(area, 60, 13));
}
