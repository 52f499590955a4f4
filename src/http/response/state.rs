use crate::http::Error;

use serde::de::DeserializeOwned;

pub enum Response<T> {
    Success(Inner<T>),
    Error(Error),
}

pub struct Inner<T> {
    pub payload: T,
}

impl<T> Response<T> {
    pub fn collect(self) -> Result<T, Error> {
        match self {
            Response::Success(response) => Ok(response.payload),
            Response::Error(err) => Err(err),
        }
    }
}

pub trait AsyncFrom<T>: Sized {
    async fn async_from(value: T) -> Self;
}

impl<T> AsyncFrom<reqwest::Response> for Response<T>
where
    T: DeserializeOwned,
{
    async fn async_from(value: reqwest::Response) -> Self {
        let status = value.status().as_u16();

        let text = match value.text().await {
            Ok(text) => text,
            Err(cause) => return Response::Error(Error::ReadResponseTextError { cause }),
        };

        if !(200..300).contains(&status) {
            return Response::Error(Error::StatusError {
                status,
                message: text,
            });
        }

        match serde_json::from_str::<T>(&text) {
            Ok(payload) => Response::Success(Inner { payload }),
            Err(cause) => Response::Error(Error::ParseResponseError { cause }),
        }
    }
}
