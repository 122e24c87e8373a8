use ::log::error;
use rocket::fairing::AdHoc;
use rocket::serde::json::{json, Json, Value};
use rocket::*;

mod config;
mod database;
mod i18n;
mod leaderboard;
#[cfg(test)]
mod tests;

use config::Config;
use database::{requests, ScoreStore};
use i18n::MessageKey;

#[launch]
fn rocket() -> _ {
    let rocket = rocket::build();
    let config = Config::from_env();
    assemble(rocket, config)
}

/// Mounts the routes and attaches the score store described by `config`.
pub fn assemble(rocket: Rocket<Build>, config: Config) -> Rocket<Build> {
    rocket
        .attach(AdHoc::try_on_ignite("Score store", move |rocket| async move {
            match ScoreStore::connect_lazy(&config) {
                Ok(store) => Ok(rocket.manage(store)),
                Err(e) => {
                    error!("Failed to set up the score store: {}", e);
                    Err(rocket)
                }
            }
        }))
        .attach(AdHoc::on_shutdown("Close score store", |rocket| {
            Box::pin(async move {
                if let Some(store) = rocket.state::<ScoreStore>() {
                    store.close().await;
                }
            })
        }))
        .mount(
            "/",
            routes![
                index,
                requests::submit_score,
                requests::get_score,
                requests::put_score,
                requests::patch_score,
                requests::delete_score,
                requests::get_leaderboard,
            ],
        )
        .register("/", catchers![default_catcher])
}

#[get("/")]
fn index() -> &'static str {
    "This is the trivia leaderboard server!"
}

#[catch(default)]
fn default_catcher(status: http::Status, request: &Request<'_>) -> (http::Status, Json<Value>) {
    let key = match status.code {
        400 | 422 => MessageKey::StructureInvalid,
        404 => MessageKey::NotFound,
        405 => MessageKey::MethodNotAllowed,
        _ => MessageKey::ServerError,
    };
    let lang = database::request_lang(request);
    (status, Json(json!({ "error": i18n::message(lang, key) })))
}
