pub mod error_code;
pub mod level;
pub mod pagination;
pub mod response;

pub use error_code::ErrorCode;
pub use level::ProficiencyLevel;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

/// 以字符串形式存储/传输的枚举
///
/// 生成 serde 重命名、`Display`、`FromStr` 以及 ts 类型导出。
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($ts_file:tt) {
            $($variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize, ::ts_rs::TS)]
        #[ts(export, export_to = $ts_file)]
        $vis enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::ProficiencyLevel;

    #[test]
    fn test_string_enum_round_trip() {
        for level in ProficiencyLevel::ALL {
            assert_eq!(level.as_str().parse::<ProficiencyLevel>().unwrap(), *level);
        }
        assert_eq!(
            serde_json::to_string(&ProficiencyLevel::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert!("expert".parse::<ProficiencyLevel>().is_err());
    }
}
