use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;

use crate::errors::{CourseHubError, Result};

/// 将记录序列化为 CSV 文本（首行为表头）
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CourseHubError::serialization(format!("CSV write failed: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| CourseHubError::serialization(format!("CSV flush failed: {e}")))
}

/// 构造附件下载响应
pub fn csv_attachment(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        name: String,
        score: Option<f64>,
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let rows = vec![
            Row { id: 1, name: "alice".into(), score: Some(92.5) },
            Row { id: 2, name: "bob, jr".into(), score: None },
        ];
        let text = String::from_utf8(to_csv(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,name,score");
        assert_eq!(lines[1], "1,alice,92.5");
        assert_eq!(lines[2], "2,\"bob, jr\",");
    }

    #[test]
    fn test_attachment_headers() {
        let resp = csv_attachment("users.csv", b"a\n".to_vec());
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("users.csv"));
    }
}
