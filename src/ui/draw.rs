//! Rendering of the prediction form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::types::record::FEATURE_COUNT;
use crate::ui::app::{App, Focus, Outcome};
use crate::ui::form::{SliderSpec, SLIDERS};
use crate::ui::theme::Theme;

const TITLE: &str = "Silica Concentration Predictor";

const WELCOME: &str = "Welcome! This application uses a machine learning model to predict the \
                       final silica concentration in flotation columns from key operating parameters.";

const USES: &[(&str, &str)] = &[
    ("Optimize", "operating conditions to lower the final silica concentration."),
    ("Predict", "the impact of process changes before applying them."),
    ("Troubleshoot", "potential problems by simulating different scenarios."),
];

const SLIDER_HEIGHT: u16 = 8;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    draw_sidebar(f, cols[0], app);
    draw_main(f, cols[1], app);
    draw_footer(f, rows[1], app);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Input Parameters ")
        .title_style(Theme::title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(std::iter::repeat(Constraint::Length(SLIDER_HEIGHT)).take(FEATURE_COUNT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let intro = Paragraph::new(Line::from(Span::styled(
        "Match the sliders to the operating parameters of the flotation process.",
        Theme::dim(),
    )))
    .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[0]);

    for (idx, spec) in SLIDERS.iter().enumerate() {
        let focused = app.focus == Focus::Slider(idx);
        draw_slider(f, chunks[idx + 1], spec, app.value(idx), focused);
    }
}

fn draw_slider(f: &mut Frame, area: Rect, spec: &SliderSpec, value: f64, focused: bool) {
    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ({}) ", spec.label, spec.unit))
        .title_style(Theme::title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Theme::gauge())
        .ratio(spec.ratio(value))
        .label(Span::styled(format!("{value:.2}"), Theme::title()));
    f.render_widget(gauge, parts[0]);

    let range = Line::from(vec![
        Span::styled(format!("{:.2}", spec.bounds.min), Theme::muted()),
        Span::styled("  ..  ", Theme::muted()),
        Span::styled(format!("{:.2}", spec.bounds.max), Theme::muted()),
        Span::styled(format!("   step {}", spec.step), Theme::muted()),
    ]);
    f.render_widget(Paragraph::new(range), parts[1]);

    let caption = Paragraph::new(Span::styled(spec.caption, Theme::dim())).wrap(Wrap { trim: true });
    f.render_widget(caption, parts[2]);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![
        Constraint::Length(9),
        Constraint::Length(3),
        Constraint::Min(6),
    ];
    if app.show_about {
        constraints.push(Constraint::Length(14));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_header(f, chunks[0]);
    draw_button(f, chunks[1], app);
    draw_result(f, chunks[2], app);
    if app.show_about {
        draw_about(f, chunks[3]);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(TITLE, Theme::title())),
        Line::from(""),
        Line::from(Span::styled(WELCOME, Theme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "This tool can help process engineers and operators:",
            Theme::title(),
        )),
    ];
    lines.extend(USES.iter().map(|(verb, rest)| {
        Line::from(vec![
            Span::styled("  • ", Theme::muted()),
            Span::styled(*verb, Theme::title()),
            Span::styled(format!(" {rest}"), Theme::text()),
        ])
    }));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_button(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::PredictButton;
    let (style, border) = match (app.can_predict(), focused) {
        (false, _) => (Theme::button_disabled(), Theme::border()),
        (true, true) => (Theme::button(), Theme::border_focused()),
        (true, false) => (Theme::title(), Theme::border()),
    };

    let button = Paragraph::new(Line::from(Span::styled(" Predict Concentration ", style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(button, area);
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Prediction Result ")
        .title_style(Theme::title());

    let lines: Vec<Line> = if let Some(err) = app.load_error() {
        vec![
            Line::from(Span::styled(
                "The model could not be loaded. Check the model file path.",
                Theme::warn(),
            )),
            Line::from(Span::styled(err.to_string(), Theme::dim())),
        ]
    } else {
        match &app.outcome {
            None => vec![Line::from(Span::styled(
                "Adjust the parameters and press Predict.",
                Theme::muted(),
            ))],
            Some(Outcome::Success(result)) => vec![
                Line::from(vec![
                    Span::styled("Predicted concentration: ", Theme::title()),
                    Span::styled(result.display_value(), Theme::ok()),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    "This value is the estimated final silica concentration percentage.",
                    Theme::info(),
                )),
                Line::from(Span::styled(
                    format!(
                        "at {}  ·  model call {} µs",
                        result.predicted_at.format("%H:%M:%S"),
                        result.latency.as_micros()
                    ),
                    Theme::muted(),
                )),
            ],
            Some(Outcome::Failure(message)) => vec![
                Line::from(Span::styled(
                    "An error occurred during prediction:",
                    Theme::error(),
                )),
                Line::from(Span::styled(message.as_str(), Theme::text())),
            ],
        }
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_about(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" About ")
        .title_style(Theme::title());

    let lines = vec![
        Line::from(Span::styled("How does it work?", Theme::title())),
        Line::from("1. Input: set the key operating parameters with the sliders."),
        Line::from("2. Prediction: the pre-trained model analyses them using patterns learned from historical data."),
        Line::from("3. Result: the predicted final silica concentration is shown as a percentage."),
        Line::from(""),
        Line::from(Span::styled("Model details", Theme::title())),
        Line::from("• Type: regression model (optimized XGBoost)"),
        Line::from("• Purpose: predict the final silica concentration"),
        Line::from("• Features: amina flow, air flow in flotation column 01, iron concentrate %"),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let metrics = app.metrics();
    let line = Line::from(vec![
        Span::styled("↑↓", Theme::dim()),
        Span::styled(" move  ", Theme::muted()),
        Span::styled("←→", Theme::dim()),
        Span::styled(" adjust (shift: 0.01)  ", Theme::muted()),
        Span::styled("p/enter", Theme::dim()),
        Span::styled(" predict  ", Theme::muted()),
        Span::styled("r", Theme::dim()),
        Span::styled(" reset  ", Theme::muted()),
        Span::styled("i", Theme::dim()),
        Span::styled(" about  ", Theme::muted()),
        Span::styled("q", Theme::dim()),
        Span::styled(" quit    ", Theme::muted()),
        Span::styled(
            format!(
                "predictions: {}  failures: {}",
                metrics.prediction_count(),
                metrics.failure_count()
            ),
            Theme::dim(),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
