//! crates/informes_core/src/messages.rs
//!
//! Locale-specific catalog of every user-visible string.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" | "es_es" => Ok(Locale::Es),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("'{}' is not a supported locale", other)),
        }
    }
}

/// The message set handed to validators and flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub password_required: &'static str,
    /// `{min}` is replaced with the minimum length.
    pub password_too_short: &'static str,
    pub required_fields: &'static str,
    pub no_session: &'static str,
    pub network: &'static str,
    pub permission: &'static str,
    pub configuration: &'static str,
    pub invalid_credentials: &'static str,
    pub user_disabled: &'static str,
    pub too_many_attempts: &'static str,
    pub error_prefix: &'static str,
    pub unknown_error: &'static str,
    pub login_success: &'static str,
    pub report_saving: &'static str,
    pub report_saved: &'static str,
    pub report_saved_toast: &'static str,
    pub attachments_pending: &'static str,
    pub submission_in_progress: &'static str,
}

static ES: Messages = Messages {
    email_required: "El correo electrónico es obligatorio",
    email_invalid: "El formato del correo electrónico no es válido",
    password_required: "La contraseña es obligatoria",
    password_too_short: "La contraseña debe tener al menos {min} caracteres",
    required_fields: "Error: Los campos con * son obligatorios",
    no_session: "Error: Debe iniciar sesión para guardar informes",
    network: "ERROR DE RED: Verifica tu conexión a internet",
    permission: "ERROR DE PERMISOS: Cambia las reglas de Firestore para permitir escritura",
    configuration: "ERROR DE CONFIGURACIÓN: Verifica la configuración de Firebase",
    invalid_credentials: "Error: Correo o contraseña incorrectos",
    user_disabled: "Error: La cuenta está deshabilitada",
    too_many_attempts: "Error: Demasiados intentos, inténtalo más tarde",
    error_prefix: "Error: ",
    unknown_error: "Error desconocido",
    login_success: "Login exitoso",
    report_saving: "Guardando informe...",
    report_saved: "Informe guardado exitosamente!",
    report_saved_toast: "Informe guardado",
    attachments_pending: "Funcionalidad de archivos próximamente",
    submission_in_progress: "Ya hay un envío en curso",
};

static EN: Messages = Messages {
    email_required: "Email is required",
    email_invalid: "Email format is not valid",
    password_required: "Password is required",
    password_too_short: "Password must be at least {min} characters",
    required_fields: "Error: Fields marked with * are required",
    no_session: "Error: You must sign in to save reports",
    network: "NETWORK ERROR: Check your internet connection",
    permission: "PERMISSION ERROR: Update the Firestore rules to allow writes",
    configuration: "CONFIGURATION ERROR: Check the Firebase configuration",
    invalid_credentials: "Error: Wrong email or password",
    user_disabled: "Error: This account is disabled",
    too_many_attempts: "Error: Too many attempts, try again later",
    error_prefix: "Error: ",
    unknown_error: "Unknown error",
    login_success: "Login successful",
    report_saving: "Saving report...",
    report_saved: "Report saved successfully!",
    report_saved_toast: "Report saved",
    attachments_pending: "File attachments are coming soon",
    submission_in_progress: "A submission is already in progress",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Es => &ES,
            Locale::En => &EN,
        }
    }

    pub fn password_too_short(&self, min: usize) -> String {
        self.password_too_short.replace("{min}", &min.to_string())
    }

    /// Wraps a raw collaborator message, falling back to the catalog's
    /// "unknown error" text when the collaborator gave none.
    pub fn raw_error(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            format!("{}{}", self.error_prefix, self.unknown_error)
        } else {
            format!("{}{}", self.error_prefix, raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_tags() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn raw_error_falls_back_when_empty() {
        let es = Messages::for_locale(Locale::Es);
        assert_eq!(es.raw_error("  "), "Error: Error desconocido");
        assert_eq!(es.raw_error("boom"), "Error: boom");
    }

    #[test]
    fn password_hint_mentions_minimum() {
        let en = Messages::for_locale(Locale::En);
        assert_eq!(en.password_too_short(6), "Password must be at least 6 characters");
    }
}
