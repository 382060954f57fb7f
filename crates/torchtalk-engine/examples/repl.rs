//! Interactive console over the canned catalog: type messages, watch the
//! per-turn decision. `RUST_LOG=debug` shows every stage.

use std::io::{self, BufRead, Write};

use test_fixtures::{MockGenerator, MockRetriever};
use torchtalk_core::config::EngineConfig;
use torchtalk_engine::{SessionManager, TurnEngine};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let retriever = MockRetriever::new();
    let generator = MockGenerator::silent();
    let store = SessionManager::default();
    let engine = TurnEngine::new(&retriever, &generator, &store, EngineConfig::default());
    let session = store.create_session();

    println!("torchtalk repl, session {session}. Ctrl-D to quit.");
    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        match engine.handle_turn(&session, message, &[]) {
            Ok(outcome) => {
                println!(
                    "intent={} action={:?} form={} ask_type={}",
                    outcome.decision.intent,
                    outcome.decision.next_action,
                    outcome.flags.should_show_form,
                    outcome.flags.should_ask_type,
                );
                for item in &outcome.flags.display_items {
                    println!("  {} {}", item.code, item.name);
                }
            }
            Err(e) => eprintln!("turn failed: {e}"),
        }
    }
    Ok(())
}
