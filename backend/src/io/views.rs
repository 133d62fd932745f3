//! HTML pages served by the REST layer.
//!
//! Plain string rendering; every user-supplied value goes through
//! [`escape_html`].

use std::collections::BTreeMap;

use shared::SurveyForm;

use crate::domain::html::escape_html;
use crate::domain::models::response::{form_value, SurveyField, SurveyResponse};

const STYLE: &str = "body{font-family:sans-serif;color:#333;max-width:960px;margin:0 auto;padding:20px;}\
label{display:block;margin-top:12px;font-weight:bold;}\
input,textarea{width:100%;padding:6px;box-sizing:border-box;}\
.error{color:#dc3545;font-size:0.9em;}\
table{border-collapse:collapse;width:100%;}\
th,td{border:1px solid #dee2e6;padding:6px 10px;text-align:left;}\
th{background:#f8f9fa;}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title),
    )
}

/// The survey form, pre-filled with `values` and annotated with `errors`
pub fn render_form_page(values: &SurveyForm, errors: &BTreeMap<SurveyField, &str>) -> String {
    let mut body = String::from("<h1>セミナーアンケート</h1>\n<form method=\"post\" action=\"/submit\">\n");

    for field in SurveyField::ALL.into_iter().skip(1) {
        let required = SurveyField::REQUIRED.contains(&field);
        let marker = if required { " <span class=\"error\">*</span>" } else { "" };
        let value = escape_html(form_value(values, field));
        let name = field.as_str();

        body.push_str(&format!("<label for=\"{name}\">{}{marker}</label>\n", field.label()));
        if field == SurveyField::Comment {
            body.push_str(&format!("<textarea id=\"{name}\" name=\"{name}\" rows=\"5\">{value}</textarea>\n"));
        } else {
            let input_type = if field == SurveyField::Email { "email" } else { "text" };
            body.push_str(&format!(
                "<input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n"
            ));
        }
        if let Some(message) = errors.get(&field) {
            body.push_str(&format!("<div class=\"error\">{}</div>\n", escape_html(message)));
        }
    }

    body.push_str("<p><button type=\"submit\">送信する</button></p>\n</form>\n");
    page("セミナーアンケート", &body)
}

pub fn render_thanks_page() -> String {
    page(
        "ご回答ありがとうございました",
        "<h1>ご回答ありがとうございました</h1>\n<p>アンケートへのご協力ありがとうございました。</p>\n",
    )
}

pub fn render_login_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>管理画面ログイン</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
    }
    body.push_str(
        "<form method=\"post\" action=\"/admin\">\n\
         <label for=\"token\">アクセストークン</label>\n\
         <input type=\"password\" id=\"token\" name=\"token\">\n\
         <p><button type=\"submit\">ログイン</button></p>\n</form>\n",
    );
    page("管理画面ログイン", &body)
}

pub fn render_access_denied_page() -> String {
    page("アクセスが拒否されました", "<h1>403 Forbidden</h1>\n<p>アクセスが拒否されました。</p>\n")
}

/// Admin list of every response. `responses` is None when storage could not
/// be read.
pub fn render_admin_page(responses: Option<&[SurveyResponse]>, share_url: &str, csv_url: &str) -> String {
    let mut body = String::from("<h1>回答一覧</h1>\n");
    body.push_str(&format!(
        "<p>共有リンク: <a href=\"{url}\">{url}</a></p>\n<p><a href=\"{csv}\">CSVダウンロード</a></p>\n",
        url = escape_html(share_url),
        csv = escape_html(csv_url),
    ));

    let Some(responses) = responses else {
        body.push_str("<p class=\"error\">回答データを読み込めませんでした。</p>\n");
        return page("回答一覧", &body);
    };

    body.push_str(&format!("<p>回答数: {}</p>\n<table>\n<tr>", responses.len()));
    for label in SurveyField::header_labels() {
        body.push_str(&format!("<th>{label}</th>"));
    }
    body.push_str("</tr>\n");

    for response in responses {
        body.push_str("<tr>");
        for value in response.values() {
            body.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>\n");

    page("回答一覧", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::response::REQUIRED_FIELD_MESSAGE;

    #[test]
    fn test_form_page_keeps_values_and_shows_errors() {
        let values = SurveyForm {
            name: "田中\"太郎\"".to_string(),
            comment: "<script>".to_string(),
            ..SurveyForm::default()
        };
        let mut errors = BTreeMap::new();
        errors.insert(SurveyField::Phone, REQUIRED_FIELD_MESSAGE);

        let html = render_form_page(&values, &errors);
        assert!(html.contains("value=\"田中&quot;太郎&quot;\""));
        assert!(html.contains("&lt;script&gt;</textarea>"));
        assert_eq!(html.matches(REQUIRED_FIELD_MESSAGE).count(), 1);
        assert!(!html.contains("name=\"submitted_at\""));
    }

    #[test]
    fn test_admin_page_lists_rows() {
        let response = SurveyResponse {
            submitted_at: "2024-05-01 10:00:00".to_string(),
            name: "<b>x</b>".to_string(),
            phone: "1".to_string(),
            email: "a@b.com".to_string(),
            company: "Acme".to_string(),
            position: "CEO".to_string(),
            comment: String::new(),
        };

        let html = render_admin_page(Some(std::slice::from_ref(&response)), "http://h/admin/t", "http://h/admin/t/csv");
        assert!(html.contains("回答数: 1"));
        assert!(html.contains("<td>&lt;b&gt;x&lt;/b&gt;</td>"));
        assert!(html.contains("href=\"http://h/admin/t/csv\""));
    }

    #[test]
    fn test_admin_page_reports_unavailable_storage() {
        let html = render_admin_page(None, "http://h/admin/t", "http://h/admin/t/csv");
        assert!(html.contains("読み込めませんでした"));
        assert!(!html.contains("<table>"));
    }
}
