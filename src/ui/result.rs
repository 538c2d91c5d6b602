use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::data::{category_color, category_icon};
use crate::models::{QuizResult, Tip};
use crate::quiz::PerformanceTier;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.last_result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], result);
    render_tips(frame, chunks[1], &result.personalized_tips, app.result_scroll());
    super::render_controls(
        frame,
        chunks[2],
        "j/k scroll  ·  r play again  ·  t all tips  ·  h home  ·  q quit",
    );
}

fn get_grade_color(tier: PerformanceTier) -> Color {
    match tier {
        PerformanceTier::Excellent => Color::Green,
        PerformanceTier::VeryGood => Color::Cyan,
        PerformanceTier::Good => Color::Blue,
        PerformanceTier::Fair => Color::Yellow,
        PerformanceTier::KeepStudying => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &QuizResult) {
    let tier = PerformanceTier::for_accuracy(result.accuracy_percent);
    let grade_color = get_grade_color(tier);

    let content = vec![
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} points  ·  {} / {}  ({:.0}%)",
                result.score, result.correct_count, result.total, result.accuracy_percent
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} correct", result.correct_count),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} incorrect", result.incorrect_count),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(""),
        Line::from(tier.message().fg(Color::White)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

pub(super) fn tip_lines(tips: &[&Tip]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(tips.len() * 3);
    for tip in tips {
        let color = category_color(&tip.category);
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", category_icon(&tip.category))),
            Span::styled(tip.category.clone(), Style::default().fg(color).bold()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", tip.text),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn render_tips(frame: &mut Frame, area: Rect, tips: &[Tip], scroll: usize) {
    let tips: Vec<&Tip> = tips.iter().collect();
    let widget = Paragraph::new(tip_lines(&tips))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Tips for you ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll(((scroll * 3) as u16, 0));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_for(accuracy_percent: f64) -> Color {
        get_grade_color(PerformanceTier::for_accuracy(accuracy_percent))
    }

    #[test]
    fn test_grade_color_follows_message_tiers() {
        assert_eq!(color_for(95.0), Color::Green);
        assert_eq!(color_for(85.0), Color::Cyan);
        assert_eq!(color_for(75.0), Color::Blue);
        assert_eq!(color_for(65.0), Color::Yellow);
        assert_eq!(color_for(55.0), Color::Red);
        assert_ne!(color_for(65.0), color_for(55.0));
        assert_ne!(color_for(85.0), color_for(75.0));
    }
}
