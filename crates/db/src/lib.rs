pub mod error;

use model::{code, Answer, Draft, Question, Quiz, Score, Submission};
use tokio_postgres::{error::SqlState, types::Json, Row};

pub use futures_util::{TryStream, TryStreamExt};
pub use tokio_postgres::{tls::NoTls, Client, Config};

/// How many fresh codes to try before giving up on a quiz insertion.
const CODE_ATTEMPTS: usize = 8;

/// Schema of every table used by the store. Safe to run repeatedly.
pub const SCHEMA: &str = include_str!("../schema.sql");

macro_rules! quiz_columns {
    () => {
        "id, code, creator, creator_name, title, description, questions, shuffle_questions, created_at, updated_at"
    };
}

macro_rules! submission_columns {
    () => {
        "id, quiz, author, author_name, answers, correct, total, percentage, submitted_at"
    };
}

pub struct Database(Client);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(client)
    }
}

fn deserialize_quiz_from_row(row: &Row) -> error::Result<Quiz> {
    let Json(questions): Json<Vec<Question>> = row.try_get("questions")?;
    Ok(Quiz {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        creator: row.try_get("creator")?,
        creator_name: row.try_get("creator_name")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        questions,
        shuffle_questions: row.try_get("shuffle_questions")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn deserialize_submission_from_row(row: &Row) -> error::Result<Submission> {
    let Json(answers): Json<Vec<Option<Answer>>> = row.try_get("answers")?;
    let correct: i32 = row.try_get("correct")?;
    let total: i32 = row.try_get("total")?;
    let percentage: i16 = row.try_get("percentage")?;
    let score = Score {
        correct: u32::try_from(correct).map_err(|_| error::Error::Fatal)?,
        total: u32::try_from(total).map_err(|_| error::Error::Fatal)?,
        percentage: u8::try_from(percentage).map_err(|_| error::Error::Fatal)?,
    };
    Ok(Submission {
        id: row.try_get("id")?,
        quiz: row.try_get("quiz")?,
        author: row.try_get("author")?,
        author_name: row.try_get("author_name")?,
        answers,
        score,
        submitted_at: row.try_get("submitted_at")?,
    })
}

impl Database {
    /// Creates the tables and indices if they do not exist yet.
    pub async fn init_schema(&self) -> error::Result<()> {
        self.0.batch_execute(SCHEMA).await?;
        Ok(())
    }

    /// Inserts a new quiz under a freshly generated code. Returns the quiz ID and its code.
    pub async fn create_quiz(&self, creator: &str, creator_name: &str, draft: &Draft) -> error::Result<(i64, String)> {
        let questions = Json(&draft.questions);
        for _ in 0..CODE_ATTEMPTS {
            let code = code::generate(&mut rand::thread_rng());
            let err = match self
                .0
                .query_one(
                    "INSERT INTO quiz (code, creator, creator_name, title, description, questions, shuffle_questions) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
                    &[&code, &creator, &creator_name, &draft.title, &draft.description, &questions, &draft.shuffle_questions],
                )
                .await
            {
                Ok(row) => {
                    let id: i64 = row.try_get("id")?;
                    log::info!("created quiz {id} with code {code}");
                    return Ok((id, code));
                }
                Err(err) => err,
            };

            let collided = err
                .as_db_error()
                .map_or(false, |db| *db.code() == SqlState::UNIQUE_VIOLATION && db.constraint() == Some("quiz_code_key"));
            if !collided {
                return Err(err.into());
            }

            log::warn!("quiz code {code} is already taken");
        }

        Err(error::Error::Exhausted)
    }

    pub async fn get_quiz(&self, id: i64) -> error::Result<Option<Quiz>> {
        let Some(row) = self.0.query_opt(concat!("SELECT ", quiz_columns!(), " FROM quiz WHERE id = $1"), &[&id]).await?
        else {
            return Ok(None);
        };
        deserialize_quiz_from_row(&row).map(Some)
    }

    pub async fn get_quiz_by_code(&self, code: &str) -> error::Result<Option<Quiz>> {
        let Some(row) =
            self.0.query_opt(concat!("SELECT ", quiz_columns!(), " FROM quiz WHERE code = $1"), &[&code]).await?
        else {
            return Ok(None);
        };
        deserialize_quiz_from_row(&row).map(Some)
    }

    /// Lists the quizzes of a creator, newest first.
    pub async fn get_quizzes_by_creator(
        &self,
        creator: &str,
    ) -> error::Result<impl TryStream<Ok = Quiz, Error = error::Error> + '_> {
        Ok(self
            .0
            .query_raw(
                concat!("SELECT ", quiz_columns!(), " FROM quiz WHERE creator = $1 ORDER BY created_at DESC, id DESC"),
                &[&creator],
            )
            .await?
            .map_err(error::Error::from)
            .and_then(|row| core::future::ready(deserialize_quiz_from_row(&row))))
    }

    /// Replaces the contents of a quiz. Only the creator may do so.
    pub async fn update_quiz(&self, id: i64, creator: &str, draft: &Draft) -> error::Result<()> {
        let questions = Json(&draft.questions);
        match self
            .0
            .execute(
                "UPDATE quiz SET title = $3, description = $4, questions = $5, shuffle_questions = $6, updated_at = NOW() \
                 WHERE id = $1 AND creator = $2",
                &[&id, &creator, &draft.title, &draft.description, &questions, &draft.shuffle_questions],
            )
            .await?
        {
            1 => Ok(()),
            0 => Err(error::Error::NotFound),
            _ => Err(error::Error::Fatal),
        }
    }

    /// Deletes a quiz along with all of its submissions. Only the creator may do so.
    pub async fn delete_quiz(&self, id: i64, creator: &str) -> error::Result<()> {
        match self.0.execute("DELETE FROM quiz WHERE id = $1 AND creator = $2", &[&id, &creator]).await? {
            1 => {
                log::info!("deleted quiz {id}");
                Ok(())
            }
            0 => Err(error::Error::NotFound),
            _ => Err(error::Error::Fatal),
        }
    }

    /// Records a graded submission. Each user may only submit once per quiz.
    pub async fn submit(
        &self,
        quiz: i64,
        author: &str,
        author_name: &str,
        answers: &[Option<Answer>],
        score: Score,
    ) -> error::Result<Submission> {
        let correct = i32::try_from(score.correct).map_err(|_| error::Error::BadInput)?;
        let total = i32::try_from(score.total).map_err(|_| error::Error::BadInput)?;
        let percentage = i16::from(score.percentage);
        let row = self
            .0
            .query_one(
                concat!(
                    "INSERT INTO submission (quiz, author, author_name, answers, correct, total, percentage) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING ",
                    submission_columns!()
                ),
                &[&quiz, &author, &author_name, &Json(answers), &correct, &total, &percentage],
            )
            .await?;
        deserialize_submission_from_row(&row)
    }

    pub async fn has_submitted(&self, quiz: i64, author: &str) -> error::Result<bool> {
        let row = self
            .0
            .query_one("SELECT EXISTS (SELECT 1 FROM submission WHERE quiz = $1 AND author = $2)", &[&quiz, &author])
            .await?;
        Ok(row.try_get(0)?)
    }

    pub async fn get_submission(&self, id: i64) -> error::Result<Option<Submission>> {
        let Some(row) =
            self.0.query_opt(concat!("SELECT ", submission_columns!(), " FROM submission WHERE id = $1"), &[&id]).await?
        else {
            return Ok(None);
        };
        deserialize_submission_from_row(&row).map(Some)
    }

    /// Lists the submissions to a quiz, newest first.
    pub async fn get_submissions_by_quiz(
        &self,
        quiz: i64,
    ) -> error::Result<impl TryStream<Ok = Submission, Error = error::Error> + '_> {
        Ok(self
            .0
            .query_raw(
                concat!(
                    "SELECT ",
                    submission_columns!(),
                    " FROM submission WHERE quiz = $1 ORDER BY submitted_at DESC, id DESC"
                ),
                &[&quiz],
            )
            .await?
            .map_err(error::Error::from)
            .and_then(|row| core::future::ready(deserialize_submission_from_row(&row))))
    }

    /// Lists the submissions of a user, newest first.
    pub async fn get_submissions_by_author(
        &self,
        author: &str,
    ) -> error::Result<impl TryStream<Ok = Submission, Error = error::Error> + '_> {
        Ok(self
            .0
            .query_raw(
                concat!(
                    "SELECT ",
                    submission_columns!(),
                    " FROM submission WHERE author = $1 ORDER BY submitted_at DESC, id DESC"
                ),
                &[&author],
            )
            .await?
            .map_err(error::Error::from)
            .and_then(|row| core::future::ready(deserialize_submission_from_row(&row))))
    }
}

#[cfg(test)]
mod tests {
    use super::{error::Error, Config, Database, Draft, NoTls, TryStreamExt};
    use model::{score, Answer, Key, Question};
    use std::collections::BTreeSet;

    fn draft() -> Draft {
        Draft {
            title: String::from("Solar System"),
            description: String::from("Planets and moons."),
            questions: vec![
                Question::Identification {
                    question: String::from("What is the largest planet in the solar system?"),
                    correct_answers: vec![String::from("Jupiter")],
                },
                Question::MultipleChoice {
                    question: String::from("Which of these are moons?"),
                    choices: vec![String::from("Titan"), String::from("Mars"), String::from("Ganymede")],
                    answer: Key::Multiple(BTreeSet::from([0, 2])),
                },
            ],
            shuffle_questions: true,
        }
    }

    #[tokio::test(flavor = "current_thread")]
    #[ignore = "requires a live PostgreSQL instance"]
    async fn database_test() {
        use std::env::var;
        let user = var("PG_USERNAME").unwrap();
        let pass = var("PG_PASSWORD").unwrap();
        let host = var("PG_HOSTNAME").unwrap();
        let data = var("PG_DATABASE").unwrap();

        let (client, conn) = Config::new()
            .user(&user)
            .password(&pass)
            .host(&host)
            .dbname(&data)
            .port(5432)
            .connect(NoTls)
            .await
            .expect("cannot connect to database");
        let handle = tokio::spawn(conn);
        let db = Database::from(client);
        db.init_schema().await.unwrap();

        // Unique identities so that reruns do not trip over old rows
        let suffix: u64 = rand::random();
        let creator = format!("creator-{suffix}");
        let student = format!("student-{suffix}");

        // Quiz creation
        let (qid, code) = db.create_quiz(&creator, "Creator", &draft()).await.unwrap();
        assert!(model::code::is_valid(&code));

        // Lookups
        let quiz = db.get_quiz(qid).await.unwrap().unwrap();
        assert_eq!(quiz.code, code);
        assert_eq!(quiz.questions, draft().questions);
        assert!(quiz.shuffle_questions);
        assert_eq!(db.get_quiz_by_code(&code).await.unwrap().unwrap().id, qid);
        let quizzes: Vec<_> = db.get_quizzes_by_creator(&creator).await.unwrap().try_collect().await.unwrap();
        assert_eq!(quizzes.as_slice(), &[quiz.clone()]);

        // Only the creator may edit
        let mut edited = draft();
        edited.title = String::from("Planets");
        assert_eq!(db.update_quiz(qid, &student, &edited).await, Err(Error::NotFound));
        db.update_quiz(qid, &creator, &edited).await.unwrap();
        assert_eq!(db.get_quiz(qid).await.unwrap().unwrap().title, "Planets");

        // Submissions are unique per user
        let answers = [Some(Answer::Text(String::from("jupiter"))), Some(Answer::Choices(BTreeSet::from([0])))];
        let result = score::score(&quiz.questions, &answers);
        assert!(!db.has_submitted(qid, &student).await.unwrap());
        let sub = db.submit(qid, &student, "Student", &answers, result).await.unwrap();
        assert_eq!(sub.score, result);
        assert_eq!(sub.answers, answers);
        assert!(db.has_submitted(qid, &student).await.unwrap());
        assert_eq!(db.submit(qid, &student, "Student", &answers, result).await, Err(Error::AlreadyExists));

        let by_quiz: Vec<_> = db.get_submissions_by_quiz(qid).await.unwrap().try_collect().await.unwrap();
        assert_eq!(by_quiz.as_slice(), &[sub.clone()]);
        let by_author: Vec<_> = db.get_submissions_by_author(&student).await.unwrap().try_collect().await.unwrap();
        assert_eq!(by_author.as_slice(), &[sub.clone()]);

        // Deleting the quiz takes its submissions along
        assert_eq!(db.delete_quiz(qid, &student).await, Err(Error::NotFound));
        db.delete_quiz(qid, &creator).await.unwrap();
        assert!(db.get_quiz(qid).await.unwrap().is_none());
        assert!(db.get_submission(sub.id).await.unwrap().is_none());

        drop(db);
        handle.await.unwrap().unwrap();
    }
}
