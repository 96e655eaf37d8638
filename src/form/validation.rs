use std::collections::BTreeMap;

use crate::form::state::{BlogForm, FormField};

/// One message per invalid field.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Check the required fields. Same rules for create and edit.
pub fn validate(form: &BlogForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required_text = [
        (FormField::Title, &form.title, "Title is required"),
        (FormField::Slug, &form.slug, "Slug is required"),
        (FormField::Description, &form.description, "Description is required"),
        (FormField::Content, &form.content, "Content is required"),
        (FormField::ReadTime, &form.read_time, "Read time is required"),
    ];
    for (field, value, message) in required_text {
        if value.trim().is_empty() {
            errors.insert(field, message.to_string());
        }
    }

    if form.author_id.as_deref().is_none_or(str::is_empty) {
        errors.insert(FormField::AuthorId, "Author is required".to_string());
    }
    if form.published_date.is_empty() {
        errors.insert(
            FormField::PublishedDate,
            "Published date is required".to_string(),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BlogForm {
        BlogForm {
            title: "Title".into(),
            slug: "title".into(),
            description: "Desc".into(),
            content: "Body".into(),
            read_time: "1 min".into(),
            published_date: "2024-01-01".into(),
            author_id: Some("a1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_each_required_field_reported_alone() {
        let cases: Vec<(FormField, fn(&mut BlogForm))> = vec![
            (FormField::Title, |f| f.title.clear()),
            (FormField::Slug, |f| f.slug = "  ".into()),
            (FormField::Description, |f| f.description.clear()),
            (FormField::Content, |f| f.content = "\n".into()),
            (FormField::ReadTime, |f| f.read_time.clear()),
            (FormField::PublishedDate, |f| f.published_date.clear()),
            (FormField::AuthorId, |f| f.author_id = None),
        ];

        for (field, blank) in cases {
            let mut form = valid_form();
            blank(&mut form);
            let errors = validate(&form);
            assert_eq!(
                errors.keys().copied().collect::<Vec<_>>(),
                vec![field],
                "blanking {field} should fail only {field}"
            );
        }
    }

    #[test]
    fn test_optional_fields_not_required() {
        let mut form = valid_form();
        form.tags.clear();
        form.reviewed_at.clear();
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn test_messages() {
        let errors = validate(&BlogForm::default());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[&FormField::Title], "Title is required");
        assert_eq!(errors[&FormField::AuthorId], "Author is required");
        assert_eq!(
            errors[&FormField::PublishedDate],
            "Published date is required"
        );
    }
}
