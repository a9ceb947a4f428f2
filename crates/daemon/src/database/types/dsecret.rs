use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Encode, Sqlite, Type};

use common::prelude::Secret;

/// Database-compatible secret wrapper (stored as TEXT)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DSecret(Secret);

impl From<DSecret> for Secret {
    fn from(val: DSecret) -> Self {
        val.0
    }
}

impl From<Secret> for DSecret {
    fn from(secret: Secret) -> Self {
        Self(secret)
    }
}

impl std::ops::Deref for DSecret {
    type Target = Secret;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Decode<'_, Sqlite> for DSecret {
    fn decode(value: SqliteValueRef<'_>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(Self(Secret::from(s)))
    }
}

impl Encode<'_, Sqlite> for DSecret {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'_>>,
    ) -> Result<IsNull, BoxDynError> {
        args.push(SqliteArgumentValue::Text(self.0.as_str().to_string().into()));
        Ok(IsNull::No)
    }
}

impl Type<Sqlite> for DSecret {
    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
    }

    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}
