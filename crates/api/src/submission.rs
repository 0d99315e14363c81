use crate::{
    error::{Error, Result},
    quiz::{ensure_can_answer, fetch_owned},
    util::{
        identity::User,
        response::{self, Reply},
    },
};
use alloc::vec::Vec;
use db::{Database, TryStreamExt};
use hyper::StatusCode;
use model::{
    draft::check_answers,
    score::score,
    stats::{breakdown, QuestionStats, Summary},
    Attempt, Submission,
};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'s> {
    submissions: &'s [Submission],
    /// Absent until someone submits.
    summary: Option<Summary>,
    questions: Vec<QuestionStats>,
}

pub async fn submit(db: &Database, user: &User<'_>, id: i64, attempt: Attempt) -> Result<Reply> {
    let quiz = db.get_quiz(id).await?.ok_or(Error::UnknownQuiz)?;
    ensure_can_answer(db, user, &quiz).await?;

    let Attempt { answers, order } = attempt;
    let answers = match order {
        Some(order) => order.restore(answers).map_err(Error::Order)?,
        None => answers,
    };
    check_answers(&quiz.questions, &answers).map_err(Error::Attempt)?;

    let score = score(&quiz.questions, &answers);
    let submission = db.submit(quiz.id, user.id, user.name, &answers, score).await.map_err(|err| match err {
        db::error::Error::AlreadyExists => Error::AlreadySubmitted,
        db::error::Error::NotFound => Error::UnknownQuiz,
        err => err.into(),
    })?;

    log::info!("user {} scored {}/{} on quiz {id}", user.id, score.correct, score.total);
    response::json(StatusCode::CREATED, &submission)
}

pub async fn list_for_quiz(db: &Database, user: &User<'_>, id: i64) -> Result<Reply> {
    let quiz = fetch_owned(db, user, id).await?;
    let submissions: Vec<_> = db.get_submissions_by_quiz(quiz.id).await?.try_collect().await?;
    let summary = Summary::new(submissions.iter().map(|sub| &sub.score));
    let questions = breakdown(&quiz.questions, &submissions);
    response::json(StatusCode::OK, &Report { submissions: &submissions, summary, questions })
}

pub async fn list_mine(db: &Database, user: &User<'_>) -> Result<Reply> {
    let submissions: Vec<_> = db.get_submissions_by_author(user.id).await?.try_collect().await?;
    response::json(StatusCode::OK, &submissions)
}

pub async fn get(db: &Database, user: &User<'_>, id: i64) -> Result<Reply> {
    let submission = db.get_submission(id).await?.ok_or(Error::UnknownSubmission)?;
    if submission.author != user.id {
        let quiz = db.get_quiz(submission.quiz).await?.ok_or(Error::UnknownSubmission)?;
        if !quiz.is_owned_by(user.id) {
            return Err(Error::NotOwner);
        }
    }
    response::json(StatusCode::OK, &submission)
}
