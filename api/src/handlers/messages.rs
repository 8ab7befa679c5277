//! Bilingual response texts, written as `English | Українська`

pub const AUTH_REQUIRED: &str = "Authentication required | Потрібна автентифікація";

pub const INTERNAL_ERROR: &str = "Internal server error | Внутрішня помилка сервера";

pub const INVALID_JSON: &str = "Invalid request body | Невірне тіло запиту";

pub const INVALID_PATH: &str = "Invalid path parameter | Невірний параметр шляху";

pub const INVALID_UPLOAD: &str = "Invalid file upload | Невірне завантаження файлу";

pub const FORBIDDEN_OTHER_USER: &str =
    "You can only change your own account | Ви можете змінювати лише власний обліковий запис";

pub const NOT_FOUND: &str = "The requested resource was not found | Запитаний ресурс не знайдено";

pub const EMAIL_CHANGE_CODE_SENT: &str =
    "Verification code sent to the new email address | Код підтвердження відправлено на нову email адресу";

pub const EMAIL_CHANGED: &str = "Email changed successfully | Email успішно змінено";

pub const EMAIL_CHANGE_CODE_RESENT: &str =
    "A new verification code has been sent | Новий код підтвердження відправлено";

pub const MATERIAL_RESEND: &str =
    "Material will be sent to your email shortly | Матеріал незабаром буде надіслано на вашу пошту";
