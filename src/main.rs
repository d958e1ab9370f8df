use std::env;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};

use parcel_console::api::{ApiClient, ParcelPages, UserPages};
use parcel_console::config::Config;
use parcel_console::kv::FileStorage;
use parcel_console::models::RegisterRequest;
use parcel_console::query::{ListController, PageFetcher};
use parcel_console::session::SessionStore;

const USAGE: &str = "usage: parcel-console <command>
  login <identifier> <password>
  logout
  whoami
  register <first> <last> <username> <email> <password> <confirm>
  track <trackingId>
  users [term]
  parcels [term]
  notifications";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load();
    let storage = FileStorage::open(&config.session_file)
        .with_context(|| format!("opening session file {}", config.session_file))?;
    let mut store = SessionStore::new(Box::new(storage));
    store.initialize();
    let store = Arc::new(Mutex::new(store));
    let api = Arc::new(ApiClient::new(&config, Arc::clone(&store))?);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let [identifier, password] = require_args(&args)?;
            let auth = api.login(identifier, password).await?;
            println!("logged in as {} ({})", auth.username, auth.role);
        }
        Some("logout") => {
            api.logout();
            println!("logged out");
        }
        Some("whoami") => {
            let guard = store.lock().expect("session store lock poisoned");
            match guard.session() {
                Some(session) => println!(
                    "{} <{}> role {}",
                    session.username, session.email, session.role
                ),
                None => println!("not logged in"),
            }
        }
        Some("register") => {
            let [first, last, username, email, password, confirm] = require_args(&args)?;
            let request = RegisterRequest {
                first_name: first.clone(),
                last_name: last.clone(),
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
                role: None,
            };
            let message = api.register(&request, confirm).await?;
            println!("{message}");
        }
        Some("track") => {
            let [tracking_id] = require_args(&args)?;
            let parcel = api.track_parcel(tracking_id).await?;
            println!("{}  {}", parcel.tracking_id, parcel.status);
            println!("  from {} ({})", parcel.sender_name, parcel.sender_address);
            println!(
                "  to   {} ({})",
                parcel.recipient_name, parcel.recipient_address
            );
            if let Some(location) = &parcel.current_location {
                println!("  currently at {location}");
            }
            if parcel.feedback_open() {
                println!("  delivered; feedback can be submitted for this parcel");
            }
        }
        Some("users") => {
            require_admin(&store)?;
            let controller =
                list(UserPages::new(Arc::clone(&api)), args.get(1).cloned()).await?;
            for user in controller.items() {
                println!(
                    "{:>4}  {:<20} {:<30} {}",
                    user.id, user.username, user.email, user.role
                );
            }
            println!(
                "page {} of {}",
                controller.query().page,
                controller.total_pages()
            );
        }
        Some("parcels") => {
            require_admin(&store)?;
            let controller =
                list(ParcelPages::new(Arc::clone(&api)), args.get(1).cloned()).await?;
            for parcel in controller.items() {
                println!(
                    "{:>4}  {:<16} {:<12} {} -> {}",
                    parcel.id,
                    parcel.tracking_id,
                    parcel.status,
                    parcel.sender_name,
                    parcel.recipient_name
                );
            }
            println!(
                "page {} of {}",
                controller.query().page,
                controller.total_pages()
            );
        }
        Some("notifications") => {
            let unread = api.unread_count().await?;
            for notification in api.list_notifications().await? {
                let marker = if notification.read { " " } else { "*" };
                println!(
                    "{marker} [{}] {}",
                    notification.parcel_tracking_id, notification.message
                );
            }
            println!("{unread} unread");
        }
        _ => {
            println!("{USAGE}");
        }
    }
    Ok(())
}

fn require_args<const N: usize>(args: &[String]) -> Result<[&String; N]> {
    let rest: Vec<&String> = args[1..].iter().collect();
    <[&String; N]>::try_from(rest).map_err(|_| anyhow::anyhow!("{USAGE}"))
}

fn require_admin(store: &Arc<Mutex<SessionStore>>) -> Result<()> {
    let guard = store.lock().expect("session store lock poisoned");
    let is_admin = guard.session().map(|s| s.is_admin()).unwrap_or(false);
    if !is_admin {
        bail!("admin access required; run `parcel-console login` first");
    }
    Ok(())
}

/// Mounts a list controller, applies the optional search term and fails the
/// command if the fetch did.
async fn list<F: PageFetcher>(fetcher: F, term: Option<String>) -> Result<ListController<F>> {
    let mut controller = ListController::mount(fetcher).await;
    if let Some(term) = term {
        controller.set_search_term(term).await;
    }
    if let Some(error) = controller.error() {
        bail!("{error}");
    }
    Ok(controller)
}
