use crate::domain::errors::DomainError;

const CNT_ADMIN_EMAIL: &str = "admins_email_key";
const CNT_ROLE_NAME: &str = "roles_name_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_CITY_NAME: &str = "cities_name_key";
const CNT_ORGANISATION_NAME: &str = "organisations_name_key";
const CNT_INSTITUTE_NAME: &str = "institutes_name_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ADMIN_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_ROLE_NAME => DomainError::Conflict("role name already exists".into()),
                    CNT_CITY_NAME | CNT_ORGANISATION_NAME | CNT_INSTITUTE_NAME => {
                        DomainError::Conflict("name already exists".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
