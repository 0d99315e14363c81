#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;

mod quiz;
mod route;
mod submission;
mod util;

use alloc::string::ToString;
use db::Database;
use error::{Error, Result};
use http_body_util::BodyExt;
use hyper::{body::Body, Request, StatusCode};
use route::Route;
use serde::de::DeserializeOwned;
use util::{identity::extract_user, response::Reply};

/// Reads the whole request body as JSON.
async fn read_json<T, B>(body: B) -> Result<T>
where
    T: DeserializeOwned,
    B: Body,
{
    let bytes = body.collect().await.map_err(|_| Error::MalformedBody)?.to_bytes();
    serde_json::from_slice(&bytes).map_err(|err| {
        log::debug!("rejected request body: {err}");
        Error::MalformedBody
    })
}

pub struct App {
    db: Database,
}

impl From<Database> for App {
    fn from(db: Database) -> Self {
        Self { db }
    }
}

impl App {
    /// Handles a request. Failures are rendered as plain-text bodies with the matching status code.
    pub async fn respond<B: Body>(&self, req: Request<B>) -> Reply {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        match self.try_respond(req).await {
            Ok(res) => {
                log::info!("{method} {path} -> {}", res.status());
                res
            }
            Err(err) => {
                let status = err.status();
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    log::error!("{method} {path} -> {status}");
                } else {
                    log::warn!("{method} {path} -> {status}: {err}");
                }
                util::response::text(status, err.to_string())
            }
        }
    }

    async fn try_respond<B: Body>(&self, req: Request<B>) -> Result<Reply> {
        let (parts, body) = req.into_parts();
        let route = Route::resolve(&parts.method, parts.uri.path())?;
        let user = extract_user(&parts.headers)?;
        let db = &self.db;

        match route {
            Route::CreateQuiz => quiz::create(db, &user, read_json(body).await?).await,
            Route::ListQuizzes => quiz::list(db, &user).await,
            Route::FindQuiz { code } => quiz::find_by_code(db, &user, code).await,
            Route::GetQuiz(id) => quiz::get(db, &user, id).await,
            Route::UpdateQuiz(id) => quiz::update(db, &user, id, read_json(body).await?).await,
            Route::DeleteQuiz(id) => quiz::delete(db, &user, id).await,
            Route::GetSheet(id) => quiz::sheet(db, &user, id).await,
            Route::Submit(id) => submission::submit(db, &user, id, read_json(body).await?).await,
            Route::ListQuizSubmissions(id) => submission::list_for_quiz(db, &user, id).await,
            Route::ListSubmissions => submission::list_mine(db, &user).await,
            Route::GetSubmission(id) => submission::get(db, &user, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use model::Draft;

    #[tokio::test]
    async fn reads_json_bodies() {
        let body = Full::new(Bytes::from_static(
            br#"{"title":"Capitals","questions":[{"type":"identification","question":"France?","correct_answers":["Paris"]}]}"#,
        ));
        let draft: Draft = read_json(body).await.unwrap();
        assert_eq!(draft.title, "Capitals");
        assert_eq!(draft.questions.len(), 1);
        assert!(!draft.shuffle_questions);
    }

    #[tokio::test]
    async fn rejects_malformed_bodies() {
        let body = Full::new(Bytes::from_static(b"{\"title\":"));
        assert!(matches!(read_json::<Draft, _>(body).await, Err(Error::MalformedBody)));
    }
}
