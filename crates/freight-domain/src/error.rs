use thiserror::Error;

/// Error del dominio de cotizaciones.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    /// Falta un campo obligatorio para construir el requerimiento.
    #[error("Campo requerido ausente: {0}")]
    MissingField(&'static str),

    #[error("Tipo de envío desconocido: {0}")]
    UnknownShippingType(String),

    #[error("Modalidad marítima desconocida: {0}")]
    UnknownSeaFreightMode(String),

    #[error("Fecha inválida: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(DomainError::MissingField("origin").to_string(), "Campo requerido ausente: origin");
        assert_eq!("rail".parse::<crate::ShippingType>().unwrap_err().to_string(),
                   "Tipo de envío desconocido: rail");
    }
}
