//! End-to-end reducer flows: sequences of messages driven through the
//! root reducer, asserting on the screens and commands that fall out.
//! No I/O - commands are inspected, never executed.

use std::collections::BTreeSet;

use grind_client::{AuthUser, Difficulty, ProblemDetail, ProblemPage, ProblemSummary};
use grind_core::event::{KeyCode, KeyEvent};
use grind_store::Config;
use grind_tui::command::Command;
use grind_tui::model::AppModel;
use grind_tui::msg::Msg;
use grind_tui::screens::{ScreenState, ScreenTag};
use grind_tui::update::update;
use grind_tui::view::view;

fn model() -> AppModel {
    AppModel::new(Config::default(), BTreeSet::new())
}

fn press(m: &mut AppModel, code: KeyCode) -> Command {
    update(m, Msg::Key(KeyEvent::new(code)))
}

fn type_text(m: &mut AppModel, text: &str) {
    for c in text.chars() {
        press(m, KeyCode::Char(c));
    }
}

fn page(ids: std::ops::Range<u64>, total: u64) -> ProblemPage {
    ProblemPage {
        problems: ids
            .map(|id| ProblemSummary {
                id,
                slug: format!("problem-{id}"),
                title: format!("Problem {id}"),
                difficulty: Difficulty::Medium,
                status: None,
                paid_only: false,
                acceptance_rate: 40.0,
            })
            .collect(),
        total,
    }
}

fn detail(slug: &str) -> Box<ProblemDetail> {
    Box::new(ProblemDetail {
        id: 7,
        slug: slug.into(),
        title: "A Problem".into(),
        difficulty: Difficulty::Medium,
        content: "statement".into(),
        hints: vec!["try harder".into()],
        example_testcases: String::new(),
        code_snippets: vec![],
        acceptance_rate: 40.0,
        likes: 0,
        dislikes: 0,
    })
}

#[test]
fn login_then_browse_then_solve_flow() {
    let mut m = model();

    // Startup auth check fails: forced to the login screen.
    update(&mut m, Msg::AuthChecked(Err("no credentials".into())));
    assert_eq!(m.screen_tag(), ScreenTag::Login);

    // Fill the form and submit.
    type_text(&mut m, "session-token");
    press(&mut m, KeyCode::Tab);
    type_text(&mut m, "csrf-token");
    let cmd = press(&mut m, KeyCode::Enter);
    assert!(matches!(cmd, Command::Login { .. }));

    // Login succeeds: back on home, signed in.
    update(
        &mut m,
        Msg::LoginFinished(Ok(AuthUser {
            username: "kay".into(),
            is_premium: false,
        })),
    );
    assert_eq!(m.screen_tag(), ScreenTag::Home);
    assert!(m.shared.user.is_some());

    // Open the problem list.
    let cmd = press(&mut m, KeyCode::Enter);
    assert_eq!(m.screen_tag(), ScreenTag::List);
    let generation = match cmd {
        Command::FetchProblems { generation, .. } => generation,
        other => panic!("expected fetch, got {other:?}"),
    };
    update(
        &mut m,
        Msg::ProblemsLoaded {
            generation,
            append: false,
            page: page(0..20, 20),
        },
    );

    // Move down and open the second problem.
    press(&mut m, KeyCode::Down);
    let cmd = press(&mut m, KeyCode::Enter);
    assert_eq!(m.screen_tag(), ScreenTag::Problem);
    match cmd {
        Command::Batch(cmds) => {
            assert!(matches!(&cmds[0], Command::FetchProblem { slug } if slug == "problem-1"));
            assert!(matches!(cmds[1], Command::StartTimer));
        }
        other => panic!("expected batch, got {other:?}"),
    }

    // Detail arrives; the hint drawer opens and closes; back to the list.
    update(
        &mut m,
        Msg::ProblemLoaded {
            slug: "problem-1".into(),
            detail: detail("problem-1"),
        },
    );
    press(&mut m, KeyCode::Char('h'));
    press(&mut m, KeyCode::Escape);
    assert_eq!(m.screen_tag(), ScreenTag::Problem);
    let cmd = press(&mut m, KeyCode::Escape);
    assert_eq!(m.screen_tag(), ScreenTag::List);
    assert_eq!(cmd, Command::StopTimer);

    // The list kept its cursor.
    match &m.screen {
        ScreenState::List(list) => assert_eq!(list.cursor, 1),
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn infinite_scroll_appends_without_losing_place() {
    let mut m = model();
    let cmd = press(&mut m, KeyCode::Enter);
    let generation = match cmd {
        Command::FetchProblems { generation, .. } => generation,
        other => panic!("expected fetch, got {other:?}"),
    };
    update(
        &mut m,
        Msg::ProblemsLoaded {
            generation,
            append: false,
            page: page(0..50, 100),
        },
    );

    // Walk near the end of the loaded page; one appending fetch fires.
    let mut append_fetches = 0;
    for _ in 0..46 {
        if let Command::FetchProblems { append: true, .. } = press(&mut m, KeyCode::Down) {
            append_fetches += 1;
        }
    }
    assert_eq!(append_fetches, 1);

    update(
        &mut m,
        Msg::ProblemsLoaded {
            generation,
            append: true,
            page: page(50..100, 100),
        },
    );
    match &m.screen {
        ScreenState::List(list) => {
            assert_eq!(list.problems.len(), 100);
            assert_eq!(list.cursor, 46);
        }
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn errors_never_kill_the_session() {
    let mut m = model();
    update(&mut m, Msg::AuthChecked(Err("offline".into())));
    update(
        &mut m,
        Msg::ProblemsFailed {
            generation: 1,
            error: "connection refused".into(),
        },
    );
    update(
        &mut m,
        Msg::ProblemReadyFailed {
            error: "timeout".into(),
        },
    );
    // Still renderable, still interactive.
    let frame = view(&m);
    assert!(!frame.is_empty());
    press(&mut m, KeyCode::Escape);
    assert_ne!(press(&mut m, KeyCode::Down), Command::Exit);
}

#[test]
fn every_screen_renders_at_every_size() {
    let sizes = [(20u16, 6u16), (80, 24), (120, 40), (200, 60)];
    let mut screens: Vec<AppModel> = Vec::new();

    let mut home = model();
    home.error = Some("an error banner".into());
    screens.push(home);

    let mut list = model();
    press(&mut list, KeyCode::Enter);
    update(
        &mut list,
        Msg::ProblemsLoaded {
            generation: 1,
            append: false,
            page: page(0..30, 90),
        },
    );
    screens.push(list);

    let mut problem = model();
    problem.navigate_to(ScreenState::Problem(
        grind_tui::screens::ProblemModel::with_detail(detail("p")),
    ));
    press(&mut problem, KeyCode::Char('h'));
    screens.push(problem);

    let mut login = model();
    update(&mut login, Msg::AuthChecked(Err("x".into())));
    screens.push(login);

    let mut help = model();
    press(&mut help, KeyCode::Char('?'));
    screens.push(help);

    for mut m in screens {
        for (w, h) in sizes {
            update(&mut m, Msg::Resize { width: w, height: h });
            let frame = view(&m);
            assert_eq!(
                frame.split('\n').count(),
                h as usize,
                "screen {:?} at {w}x{h}",
                m.screen_tag()
            );
            for line in frame.split('\n') {
                assert!(
                    grind_text::visible_width(line) <= w as usize,
                    "overwide line on {:?} at {w}x{h}",
                    m.screen_tag()
                );
            }
        }
    }
}
