use super::runner::{RunnerEvent, Simulation};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

const HELP: &str = "f: FCFS | p: Priority | r: Round Robin | +/-: quantum | g: FCFS idle gaps | q: quit";

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the terminal-user-interface
        // Raw mode is switched back off if the terminal can't be set up
        let terminal = undo_on_error(
            DisplayTerminal::open(),
            crossterm::terminal::disable_raw_mode,
        )?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Ok(Self { terminal, input_rx })
    }

    fn open() -> Result<Terminal<CrosstermBackend<Stdout>>, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(terminal)
    }

    pub fn draw(&mut self, simulation: &Simulation) -> Result<(), io::Error> {
        let title = simulation
            .algorithm()
            .map_or("No algorithm selected", |algorithm| algorithm.name());

        let status = match simulation.outcome() {
            None => Span::raw("Press a key below to run a scheduler."),
            Some(Ok(outcome)) => Span::styled(
                format!(
                    "Average waiting {:.2} | Average turnaround {:.2}",
                    outcome.average_waiting(),
                    outcome.average_turnaround()
                ),
                Style::default().fg(Color::LightGreen),
            ),
            Some(Err(err)) => Span::styled(
                format!("Error: {}", err),
                Style::default().fg(Color::LightRed),
            ),
        };

        let timeline = match simulation.outcome() {
            Some(Ok(outcome)) => outcome.timeline().to_string(),
            _ => String::new(),
        };

        // Draw the tui to the terminal
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(4),
                    Constraint::Length(1),
                ])
                .split(f.size());

            let header = Paragraph::new(vec![
                Spans::from(Span::styled(
                    format!(
                        "Quantum: {} | FCFS idle gaps: {}",
                        simulation.quantum(),
                        if simulation.idle_gaps() { "on" } else { "off" }
                    ),
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::LightBlue),
                )),
                Spans::from(status),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(header, chunks[0]);

            let items = simulation.processes().iter().map(|process| {
                Row::new(vec![
                    Cell::from(process.pid().to_string())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.arrival_time().to_string()),
                    Cell::from(process.burst_time().to_string()),
                    Cell::from(process.priority().to_string()),
                    Cell::from(process.remaining_time().to_string()),
                    Cell::from(or_dash(process.waiting_time())),
                    Cell::from(or_dash(process.turnaround_time())),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID",
                        "Arrival",
                        "Burst",
                        "Priority",
                        "Remaining",
                        "Waiting",
                        "Turnaround",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(10),
                    Constraint::Length(8),
                    Constraint::Length(10),
                ])
                .block(Block::default().title("Processes").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            let gantt = Paragraph::new(timeline.as_str())
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Timeline").borders(Borders::ALL));

            f.render_widget(gantt, chunks[2]);
            f.render_widget(Paragraph::new(HELP), chunks[3]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return RunnerEvent::Quit,
                    KeyCode::Char('f') => return RunnerEvent::Fcfs,
                    KeyCode::Char('p') => return RunnerEvent::Priority,
                    KeyCode::Char('r') => return RunnerEvent::RoundRobin,
                    KeyCode::Char('+') | KeyCode::Up => return RunnerEvent::QuantumUp,
                    KeyCode::Char('-') | KeyCode::Down => return RunnerEvent::QuantumDown,
                    KeyCode::Char('g') => return RunnerEvent::ToggleIdleGaps,
                    _ => {}
                };
            }
            Ok(DisplayEvent::Tick) => {}
            // The input thread is gone
            Err(_) => return RunnerEvent::Quit,
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}

/// Passes `result` through, running `undo` first if it is an error.
fn undo_on_error<T>(
    result: Result<T, io::Error>,
    undo: impl FnOnce() -> Result<(), io::Error>,
) -> Result<T, io::Error> {
    if result.is_err() {
        let _ = undo();
    }
    result
}

fn or_dash(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}
