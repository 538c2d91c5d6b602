use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::quiz::{format_time, TimeBand};
use crate::session::{ActiveView, Feedback, SessionView};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match app.session_view() {
        Some(SessionView::Active(view)) => render_active(frame, area, &view, app.selected_option()),
        Some(SessionView::Feedback(feedback)) => render_feedback(frame, area, feedback),
        Some(SessionView::Loading) | Some(SessionView::Finished(_)) | None => {
            let waiting = Paragraph::new("Loading quiz...")
                .alignment(Alignment::Center)
                .fg(Color::Yellow);
            frame.render_widget(waiting, area);
        }
    }

    if app.is_confirming_abandon() {
        render_abandon_prompt(frame, area);
    }
}

fn render_active(frame: &mut Frame, area: Rect, view: &ActiveView<'_>, selected: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], view);
    render_timer(frame, chunks[1], view);
    render_prompt(frame, chunks[2], view.prompt);
    render_options(frame, chunks[3], view.choices, selected);
    super::render_controls(
        frame,
        chunks[4],
        "j/k navigate  ·  enter select  ·  q leave quiz",
    );
}

fn render_progress(frame: &mut Frame, area: Rect, view: &ActiveView<'_>) {
    let progress = format!("Question {} of {}", view.index + 1, view.total);
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn time_color(seconds: u32) -> Color {
    match TimeBand::for_remaining(seconds) {
        TimeBand::Calm => Color::Green,
        TimeBand::Hurry => Color::Yellow,
        TimeBand::Critical => Color::Red,
    }
}

fn render_timer(frame: &mut Frame, area: Rect, view: &ActiveView<'_>) {
    let ratio = if view.seconds_per_question > 0 {
        f64::from(view.time_remaining) / f64::from(view.seconds_per_question)
    } else {
        0.0
    };
    let color = time_color(view.time_remaining);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(
            format_time(view.time_remaining),
            Style::default().fg(Color::White).bold(),
        ));
    frame.render_widget(gauge, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt.to_string())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, choices: &[String], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback) {
    let (headline, color) = match (feedback.correct, feedback.timed_out) {
        (true, _) => ("Correct!", Color::Green),
        (false, true) => ("Time's up!", Color::Red),
        (false, false) => ("Incorrect!", Color::Red),
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(""),
    ];
    if !feedback.correct {
        content.push(Line::from("Correct answer:".fg(Color::DarkGray)));
        content.push(Line::from(Span::styled(
            feedback.correct_answer.as_str(),
            Style::default().fg(Color::White),
        )));
        content.push(Line::from(""));
    }
    content.push(Line::from(Span::styled(
        format!("Score: {}", feedback.score),
        Style::default().fg(Color::Cyan).bold(),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, super::centered(area, 64, 10));
}

fn render_abandon_prompt(frame: &mut Frame, area: Rect) {
    let popup = super::centered(area, 50, 7);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Leave the quiz?",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from("Your progress will be lost.".fg(Color::Gray)),
        Line::from(""),
        Line::from("y leave  ·  n stay".fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Yellow),
        ),
        popup,
    );
}
