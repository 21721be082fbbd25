use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    app::{App, Screen},
    battle::{Battle, BattlePhase},
    practice::PracticeRound,
    session::TypingSession,
    ui::{render_centered, result_line, theme::Palette, typing::TypingBox, HORIZONTAL_MARGIN, VERTICAL_MARGIN},
};

/// A UI screen boundary: draws one top-level screen of the app
pub trait View {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct MenuView;

impl View for MenuView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let palette = app.theme.palette();
        let lines = vec![
            Line::from(Span::styled("Welcome to TypeCraft", palette.title())),
            Line::from(""),
            Line::from(Span::styled(
                "Enhance your typing skills while having fun.",
                palette.bold(),
            )),
            Line::from("Practice against the clock, or fight your way to the villain king."),
            Line::from(""),
            Line::from(Span::styled("(p) Start Practice", palette.bold())),
            Line::from(Span::styled("(b) Typing Battle", palette.bold())),
            Line::from(""),
            Line::from(Span::styled(
                format!("(t) theme: {} / (esc) quit", app.theme),
                palette.hint(),
            )),
        ];
        render_centered(lines, area, buf);
    }
}

pub struct PracticeView<'a> {
    round: &'a PracticeRound,
}

impl View for PracticeView<'_> {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let palette = app.theme.palette();

        if let Some(result) = self.round.result() {
            let lines = vec![
                Line::from(Span::styled("Results", palette.title())),
                Line::from(""),
                result_line(&result, &palette),
                Line::from(""),
                Line::from(Span::styled("(r)etry / (esc) back", palette.hint())),
            ];
            render_centered(lines, area, buf);
            return;
        }

        let header = Line::from(Span::styled(
            format!(
                "TypeCraft - Typing Practice   Time Left: {}s",
                self.round.countdown().remaining_secs()
            ),
            palette.title(),
        ));
        render_typing(header, self.round.session(), &palette, area, buf);
    }
}

pub struct BattleView<'a> {
    battle: &'a Battle,
}

impl View for BattleView<'_> {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let palette = app.theme.palette();
        let battle = self.battle;

        let lines = match battle.phase() {
            BattlePhase::Story => story_lines(&palette),
            BattlePhase::ChooseKnight => knight_lines(battle, &palette),
            BattlePhase::Fighting => {
                let (Some(level), Some(session)) = (battle.current_level(), battle.session())
                else {
                    return;
                };
                let header = Line::from(vec![
                    Span::styled(format!("{} (You)", battle.knight().name), palette.bold()),
                    Span::raw("  vs  "),
                    Span::styled(level.title.clone(), palette.loss()),
                    Span::styled(
                        format!(
                            "   Level {} - Time Left: {}s",
                            level.id,
                            battle.countdown().remaining_secs()
                        ),
                        palette.title(),
                    ),
                ]);
                render_typing(header, session, &palette, area, buf);
                return;
            }
            BattlePhase::LevelWon => {
                let mut lines = vec![Line::from(Span::styled(
                    format!("You Win Level {}!", battle.level_number()),
                    palette.win(),
                ))];
                if let Some(result) = battle.last_result() {
                    lines.push(result_line(&result, &palette));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "(enter) next level / (esc) menu",
                    palette.hint(),
                )));
                lines
            }
            BattlePhase::GameOver => {
                let mut lines = vec![
                    Line::from(Span::styled("Game Over", palette.loss())),
                    Line::from("You failed to defeat the villain..."),
                ];
                if let Some(result) = battle.last_result() {
                    lines.push(result_line(&result, &palette));
                }
                let rule = battle.rule();
                lines.push(Line::from(Span::styled(
                    format!(
                        "Finish before time runs out with {}+ wpm and {}%+ accuracy.",
                        rule.min_wpm, rule.min_accuracy
                    ),
                    palette.hint(),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "(enter) try again / (esc) menu",
                    palette.hint(),
                )));
                lines
            }
            BattlePhase::Victory => victory_lines(battle, &palette),
        };

        render_centered(lines, area, buf);
    }
}

fn story_lines(palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("Typing Knight", palette.title())),
        Line::from(""),
        Line::from("You are a brave knight on a quest to defeat the villain king who makes life unbearable for the people."),
        Line::from("Along the way, you will face deadly monsters and soldiers protecting the king."),
        Line::from("Sharpen your typing skills to defeat them and bring peace to the land."),
        Line::from("Only the fastest and most accurate typists will prevail and claim victory over the villain king!"),
        Line::from(""),
        Line::from(Span::styled("(enter) next / (esc) menu", palette.hint())),
    ]
}

fn knight_lines(battle: &Battle, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Choose Your Knight", palette.title())),
        Line::from(""),
    ];
    let knights = battle
        .campaign()
        .knights
        .iter()
        .enumerate()
        .map(|(idx, knight)| {
            if idx == battle.knight_index() {
                Span::styled(
                    format!(" [{}] ", knight.name),
                    palette.win().add_modifier(Modifier::REVERSED),
                )
            } else {
                Span::styled(format!("  {}  ", knight.name), palette.bold())
            }
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(knights));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(←/→) choose / (enter) start game / (esc) menu",
        palette.hint(),
    )));
    lines
}

fn victory_lines(battle: &Battle, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Ultimate Victory!", palette.win())),
        Line::from(""),
        Line::from(format!(
            "{}, you have defeated the villain king!",
            battle.knight().name
        )),
        Line::from("Peace has returned to the city. The people celebrate your bravery and honor your courage."),
    ];
    if let Some(result) = battle.last_result() {
        lines.push(result_line(&result, palette));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(enter) play again / (esc) menu",
        palette.hint(),
    )));
    lines
}

/// Header, bordered typing box and key legend
fn render_typing(
    header: Line<'static>,
    session: &TypingSession,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let typing = TypingBox {
        session,
        palette: *palette,
    };
    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);
    let box_height = typing.height_for(inner_width) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(box_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(header)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.hint());
    let inner = block.inner(chunks[1]);
    block.render(chunks[1], buf);
    typing.render(inner, buf);

    Paragraph::new(Span::styled("(esc) back", palette.hint())).render(chunks[3], buf);
}

/// Helper to construct the view for the current screen
pub fn current_view(screen: &Screen) -> Box<dyn View + '_> {
    match screen {
        Screen::Menu => Box::new(MenuView),
        Screen::Practice(round) => Box::new(PracticeView { round }),
        Screen::Battle(battle) => Box::new(BattleView { battle }),
    }
}
