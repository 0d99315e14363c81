use crate::error::{Error, Result};
use hyper::Method;

#[derive(Debug, PartialEq, Eq)]
pub enum Route<'p> {
    CreateQuiz,
    ListQuizzes,
    FindQuiz { code: &'p str },
    GetQuiz(i64),
    UpdateQuiz(i64),
    DeleteQuiz(i64),
    GetSheet(i64),
    Submit(i64),
    ListQuizSubmissions(i64),
    ListSubmissions,
    GetSubmission(i64),
}

fn parse_id(segment: &str) -> Result<i64> {
    segment.parse().map_err(|_| Error::UnknownRoute)
}

impl<'p> Route<'p> {
    pub fn resolve(method: &Method, path: &'p str) -> Result<Self> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let first = segments.next();
        let second = segments.next();
        let third = segments.next();
        if segments.next().is_some() {
            return Err(Error::UnknownRoute);
        }

        let route = match (first, second, third) {
            (Some("quizzes"), None, None) => match *method {
                Method::POST => Self::CreateQuiz,
                Method::GET => Self::ListQuizzes,
                _ => return Err(Error::MethodNotAllowed),
            },
            (Some("quizzes"), Some("code"), Some(code)) => match *method {
                Method::GET => Self::FindQuiz { code },
                _ => return Err(Error::MethodNotAllowed),
            },
            (Some("quizzes"), Some(id), None) => {
                let id = parse_id(id)?;
                match *method {
                    Method::GET => Self::GetQuiz(id),
                    Method::PUT => Self::UpdateQuiz(id),
                    Method::DELETE => Self::DeleteQuiz(id),
                    _ => return Err(Error::MethodNotAllowed),
                }
            }
            (Some("quizzes"), Some(id), Some("sheet")) => {
                let id = parse_id(id)?;
                match *method {
                    Method::GET => Self::GetSheet(id),
                    _ => return Err(Error::MethodNotAllowed),
                }
            }
            (Some("quizzes"), Some(id), Some("submissions")) => {
                let id = parse_id(id)?;
                match *method {
                    Method::POST => Self::Submit(id),
                    Method::GET => Self::ListQuizSubmissions(id),
                    _ => return Err(Error::MethodNotAllowed),
                }
            }
            (Some("submissions"), None, None) => match *method {
                Method::GET => Self::ListSubmissions,
                _ => return Err(Error::MethodNotAllowed),
            },
            (Some("submissions"), Some(id), None) => {
                let id = parse_id(id)?;
                match *method {
                    Method::GET => Self::GetSubmission(id),
                    _ => return Err(Error::MethodNotAllowed),
                }
            }
            _ => return Err(Error::UnknownRoute),
        };

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(method: Method, path: &str) -> Result<Route<'_>> {
        Route::resolve(&method, path)
    }

    #[test]
    fn resolves_quiz_routes() {
        assert_eq!(resolve(Method::POST, "/quizzes").unwrap(), Route::CreateQuiz);
        assert_eq!(resolve(Method::GET, "/quizzes/").unwrap(), Route::ListQuizzes);
        assert_eq!(resolve(Method::GET, "/quizzes/code/ABCDE-12345").unwrap(), Route::FindQuiz { code: "ABCDE-12345" });
        assert_eq!(resolve(Method::GET, "/quizzes/42").unwrap(), Route::GetQuiz(42));
        assert_eq!(resolve(Method::PUT, "/quizzes/42").unwrap(), Route::UpdateQuiz(42));
        assert_eq!(resolve(Method::DELETE, "/quizzes/42").unwrap(), Route::DeleteQuiz(42));
        assert_eq!(resolve(Method::GET, "/quizzes/42/sheet").unwrap(), Route::GetSheet(42));
        assert_eq!(resolve(Method::POST, "/quizzes/42/submissions").unwrap(), Route::Submit(42));
        assert_eq!(resolve(Method::GET, "/quizzes/42/submissions").unwrap(), Route::ListQuizSubmissions(42));
    }

    #[test]
    fn resolves_submission_routes() {
        assert_eq!(resolve(Method::GET, "/submissions").unwrap(), Route::ListSubmissions);
        assert_eq!(resolve(Method::GET, "/submissions/7").unwrap(), Route::GetSubmission(7));
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(matches!(resolve(Method::GET, "/"), Err(Error::UnknownRoute)));
        assert!(matches!(resolve(Method::GET, "/users"), Err(Error::UnknownRoute)));
        assert!(matches!(resolve(Method::GET, "/quizzes/abc"), Err(Error::UnknownRoute)));
        assert!(matches!(resolve(Method::GET, "/quizzes/code"), Err(Error::UnknownRoute)));
        assert!(matches!(resolve(Method::GET, "/quizzes/1/sheet/extra"), Err(Error::UnknownRoute)));
        assert!(matches!(resolve(Method::GET, "/quizzes/1/answers"), Err(Error::UnknownRoute)));
    }

    #[test]
    fn rejects_wrong_methods() {
        assert!(matches!(resolve(Method::DELETE, "/quizzes"), Err(Error::MethodNotAllowed)));
        assert!(matches!(resolve(Method::POST, "/quizzes/1"), Err(Error::MethodNotAllowed)));
        assert!(matches!(resolve(Method::POST, "/quizzes/1/sheet"), Err(Error::MethodNotAllowed)));
        assert!(matches!(resolve(Method::DELETE, "/submissions/1"), Err(Error::MethodNotAllowed)));
        assert!(matches!(resolve(Method::POST, "/quizzes/code/ABCDE-12345"), Err(Error::MethodNotAllowed)));
    }
}
