use crate::{
    error::{Error, Result},
    util::{
        identity::User,
        response::{self, Reply},
    },
};
use alloc::{string::String, vec::Vec};
use db::{Database, TryStreamExt};
use hyper::StatusCode;
use model::{code, sheet::Sheet, Draft, Order, Quiz};
use serde::Serialize;

#[derive(Serialize)]
struct Created<'c> {
    id: i64,
    code: &'c str,
}

#[derive(Serialize)]
struct Found<'q> {
    id: i64,
    title: &'q str,
}

fn not_found_as_unknown_quiz(err: db::error::Error) -> Error {
    match err {
        db::error::Error::NotFound => Error::UnknownQuiz,
        err => err.into(),
    }
}

/// Fetches a quiz that must belong to the caller.
pub(crate) async fn fetch_owned(db: &Database, user: &User<'_>, id: i64) -> Result<Quiz> {
    let quiz = db.get_quiz(id).await?.ok_or(Error::UnknownQuiz)?;
    if quiz.is_owned_by(user.id) {
        Ok(quiz)
    } else {
        Err(Error::NotOwner)
    }
}

/// Creators may not answer their own quizzes. Everyone else gets exactly one attempt.
fn can_answer(quiz: &Quiz, user: &str, submitted: bool) -> Result<()> {
    if quiz.is_owned_by(user) {
        Err(Error::OwnQuiz)
    } else if submitted {
        Err(Error::AlreadySubmitted)
    } else {
        Ok(())
    }
}

pub(crate) async fn ensure_can_answer(db: &Database, user: &User<'_>, quiz: &Quiz) -> Result<()> {
    if quiz.is_owned_by(user.id) {
        return Err(Error::OwnQuiz);
    }
    let submitted = db.has_submitted(quiz.id, user.id).await?;
    can_answer(quiz, user.id, submitted)
}

/// Turns the raw path segment into a well-formed code. Valid codes never need percent-encoding,
/// so an encoded segment is rejected outright instead of being mangled by the formatter.
fn parse_code(segment: &str) -> Result<String> {
    if segment.contains('%') {
        return Err(Error::InvalidCode);
    }
    let code = code::format_input(segment);
    if code::is_valid(&code) {
        Ok(code)
    } else {
        Err(Error::InvalidCode)
    }
}

pub async fn create(db: &Database, user: &User<'_>, draft: Draft) -> Result<Reply> {
    let draft = draft.validate().map_err(Error::Draft)?;
    let (id, code) = db.create_quiz(user.id, user.name, &draft).await?;
    log::info!("user {} created quiz {id} with code {code}", user.id);
    response::json(StatusCode::CREATED, &Created { id, code: &code })
}

pub async fn list(db: &Database, user: &User<'_>) -> Result<Reply> {
    let quizzes: Vec<_> = db.get_quizzes_by_creator(user.id).await?.try_collect().await?;
    response::json(StatusCode::OK, &quizzes)
}

pub async fn find_by_code(db: &Database, user: &User<'_>, input: &str) -> Result<Reply> {
    let code = parse_code(input)?;
    let quiz = db.get_quiz_by_code(&code).await?.ok_or(Error::UnknownQuiz)?;
    ensure_can_answer(db, user, &quiz).await?;
    response::json(StatusCode::OK, &Found { id: quiz.id, title: &quiz.title })
}

pub async fn get(db: &Database, user: &User<'_>, id: i64) -> Result<Reply> {
    let quiz = fetch_owned(db, user, id).await?;
    response::json(StatusCode::OK, &quiz)
}

pub async fn update(db: &Database, user: &User<'_>, id: i64, draft: Draft) -> Result<Reply> {
    let draft = draft.validate().map_err(Error::Draft)?;
    fetch_owned(db, user, id).await?;
    db.update_quiz(id, user.id, &draft).await.map_err(not_found_as_unknown_quiz)?;
    log::info!("user {} updated quiz {id}", user.id);
    Ok(response::empty(StatusCode::NO_CONTENT))
}

pub async fn delete(db: &Database, user: &User<'_>, id: i64) -> Result<Reply> {
    fetch_owned(db, user, id).await?;
    db.delete_quiz(id, user.id).await.map_err(not_found_as_unknown_quiz)?;
    Ok(response::empty(StatusCode::NO_CONTENT))
}

pub async fn sheet(db: &Database, user: &User<'_>, id: i64) -> Result<Reply> {
    let quiz = db.get_quiz(id).await?.ok_or(Error::UnknownQuiz)?;
    ensure_can_answer(db, user, &quiz).await?;

    let count = quiz.questions.len();
    let order = if quiz.shuffle_questions {
        Order::shuffled(count, &mut rand::thread_rng())
    } else {
        Order::identity(count)
    };

    let sheet = Sheet::new(&quiz, &order).map_err(Error::Order)?;
    response::json(StatusCode::OK, &sheet)
}
