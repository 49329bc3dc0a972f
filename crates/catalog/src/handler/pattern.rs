use shared::errors::AppErrorRpc;
use std::{fmt, str::FromStr};

/// The message patterns this service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcPattern {
    CreateProduct,
    FindAllProducts,
    FindOneProduct,
    UpdateProduct,
    RemoveProduct,
    ValidateProducts,
}

impl RpcPattern {
    pub const ALL: [RpcPattern; 6] = [
        RpcPattern::CreateProduct,
        RpcPattern::FindAllProducts,
        RpcPattern::FindOneProduct,
        RpcPattern::UpdateProduct,
        RpcPattern::RemoveProduct,
        RpcPattern::ValidateProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcPattern::CreateProduct => "create_product",
            RpcPattern::FindAllProducts => "find_all_products",
            RpcPattern::FindOneProduct => "find_one_product",
            RpcPattern::UpdateProduct => "update_product",
            RpcPattern::RemoveProduct => "remove_product",
            RpcPattern::ValidateProducts => "validate_products",
        }
    }
}

impl fmt::Display for RpcPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpcPattern {
    type Err = AppErrorRpc;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RpcPattern::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == s)
            .ok_or_else(|| AppErrorRpc::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_parses_back_from_its_name() {
        for pattern in RpcPattern::ALL {
            assert_eq!(pattern.as_str().parse::<RpcPattern>().unwrap(), pattern);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "delete_product".parse::<RpcPattern>().unwrap_err();

        assert!(matches!(err, AppErrorRpc::UnknownPattern(name) if name == "delete_product"));
    }
}
