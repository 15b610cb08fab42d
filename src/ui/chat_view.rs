use crate::api::models::{Contact, Message};
use crate::api::ApiClient;
use crate::app::AppConfig;
use crate::events::{ChatEvent, EventReceiver, EventSink};
use crate::sync::ChatSession;
use crate::ui::Terminal;
use std::io::Write;

const REFRESH: &str = "/refresh";
const BACK: &str = "/back";

/// One line of the transcript. Own messages carry our display name.
pub fn format_message(session: &ChatSession, message: &Message) -> String {
    if session.is_mine(message) {
        format!("{:>12} > {}", session.my_label(), message.content)
    } else {
        format!("{:>12} < {}", session.contact().display_name, message.content)
    }
}

struct ChatView {
    session: ChatSession,
    events: EventReceiver,
    shown: usize,
}

impl ChatView {
    fn render_new(&mut self) {
        for message in &self.session.messages()[self.shown..] {
            println!("{}", format_message(&self.session, message));
        }
        self.shown = self.session.messages().len();
    }

    fn handle(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::MessagesChanged => self.render_new(),
            ChatEvent::MessageSent => {
                print!("\x07");
                let _ = std::io::stdout().flush();
            }
            ChatEvent::Alert(text) => eprintln!("Error: {}", text),
            ChatEvent::ConversationReady(Some(id)) => log::info!("conversation {} ready", id),
            ChatEvent::ConversationReady(None) => {
                eprintln!("Could not set up the conversation; sending and refreshing are disabled.")
            }
        }
    }

    fn drain(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle(event);
        }
    }

    async fn on_line(&mut self, line: &str) -> bool {
        match line.trim() {
            "" => {}
            BACK => return false,
            REFRESH => {
                let added = self.session.refresh().await;
                log::debug!("refresh added {} messages", added);
            }
            text => {
                let message = self.session.stage(text);
                self.drain();
                self.session.deliver(message).await;
            }
        }
        self.drain();
        true
    }
}

/// Runs the chat screen for `contact` until `/back` or end of input.
pub async fn run(
    term: &mut Terminal,
    config: &AppConfig,
    client: ApiClient,
    contact: Contact,
) -> std::io::Result<()> {
    let (sink, events) = EventSink::channel();
    println!(
        "[{}] type to send, {} to pull new messages, {} to leave",
        contact.display_name, REFRESH, BACK
    );
    let mut view = ChatView {
        session: ChatSession::open(config, client, contact, sink),
        events,
        shown: 0,
    };

    loop {
        tokio::select! {
            line = term.next_line() => {
                let Some(line) = line? else { break };
                if !view.on_line(&line).await {
                    break;
                }
            }
            Some(event) = view.events.recv() => view.handle(event),
        }
    }
    Ok(())
}
