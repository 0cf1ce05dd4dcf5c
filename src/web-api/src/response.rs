use actix_web::{
    body::BoxBody,
    http::{
        header::{ContentDisposition, DispositionParam, DispositionType},
        StatusCode,
    },
    HttpRequest, HttpResponse, Responder,
};
use serde::Serialize;
use weather_core::Export;

#[derive(Debug)]
pub struct Response<T> {
    pub body: T,
    pub status: StatusCode,
}

impl<T> Response<T> {
    pub fn new(body: T) -> Self {
        Response {
            body,
            status: StatusCode::OK,
        }
    }

    pub fn created(body: T) -> Self {
        Response {
            body,
            status: StatusCode::CREATED,
        }
    }
}

impl<T> Responder for Response<T>
where
    T: Serialize,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}

/// A rendered export sent as a file download.
#[derive(Debug)]
pub struct Attachment(pub Export);

impl Responder for Attachment {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let Export {
            content_type,
            filename,
            payload,
        } = self.0;

        HttpResponse::Ok()
            .content_type(content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .body(payload)
    }
}
