//! Commands available on the `:` line

use super::args::Arguments;
use super::registry::Registry;
use super::CommandError;
use crate::app::App;

pub fn register(registry: &mut Registry) {
    registry.register("nc", &["name"], new_collection);
    registry.register("nr", &["name"], new_request);
    registry.register("sc", &["name"], select_collection);
    registry.register("sr", &["name"], select_request);
    registry.register("send", &["name:optional"], send);
    for name in ["q", "quit", "exit"] {
        registry.register(name, &[], quit);
    }
}

fn new_collection(args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    app.create_collection(args.required("name")?, true)
}

fn new_request(args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    app.create_request(args.required("name")?, true)
}

fn select_collection(args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    app.select_collection(args.required("name")?)
}

fn select_request(args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    app.select_request(args.required("name")?)
}

fn send(args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    if let Some(name) = args.get("name") {
        app.select_request(name)?;
    }
    app.execute_request()
}

fn quit(_args: &Arguments, app: &mut App) -> Result<(), CommandError> {
    app.quit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::app::tests::test_app;
    use crate::commands::{execute, CommandError};
    use crate::constants::DEFAULT_COLLECTION_NAME;

    #[tokio::test]
    async fn test_new_request_rejects_duplicates() {
        let mut app = test_app();
        execute(":nr Foo", &mut app).unwrap();
        assert_eq!(
            execute(":nr Foo", &mut app),
            Err(CommandError::DuplicateRequest("Foo".into()))
        );
        assert_eq!(app.active_collection().unwrap().requests.len(), 1);
        assert_eq!(app.active_request().unwrap().name, "Foo");
    }

    #[tokio::test]
    async fn test_new_collection_rejects_duplicates() {
        let mut app = test_app();
        assert_eq!(
            execute(&format!(":nc '{}'", DEFAULT_COLLECTION_NAME), &mut app),
            Err(CommandError::DuplicateCollection(DEFAULT_COLLECTION_NAME.into()))
        );
        execute(":nc Other", &mut app).unwrap();
        assert_eq!(app.collections().len(), 2);
        assert_eq!(app.active_collection().unwrap().name, "Other");
        assert!(app.active_request().is_none());
    }

    #[tokio::test]
    async fn test_select_commands() {
        let mut app = test_app();
        execute(":nr a", &mut app).unwrap();
        execute(":nr b", &mut app).unwrap();
        execute(":sr a", &mut app).unwrap();
        assert_eq!(app.active_request().unwrap().name, "a");
        assert_eq!(
            execute(":sr zzz", &mut app),
            Err(CommandError::NoSuchRequest("zzz".into()))
        );
        assert_eq!(app.active_request().unwrap().name, "a");

        execute(":nc Other", &mut app).unwrap();
        assert_eq!(
            execute(":sc Missing", &mut app),
            Err(CommandError::NoSuchCollection("Missing".into()))
        );
        execute(&format!(":sc \"{}\"", DEFAULT_COLLECTION_NAME), &mut app).unwrap();
        assert_eq!(app.active_collection().unwrap().requests.len(), 2);
    }

    #[tokio::test]
    async fn test_send_without_request() {
        let mut app = test_app();
        assert_eq!(execute(":send", &mut app), Err(CommandError::NoActiveRequest));
    }

    #[tokio::test]
    async fn test_quit_aliases() {
        for line in [":q", ":quit", ":exit"] {
            let mut app = test_app();
            execute(line, &mut app).unwrap();
            assert!(!app.is_running());
        }
    }
}
