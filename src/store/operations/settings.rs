use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// 练习方向：左列出什么语言。整轮统一生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    NativeToTarget,
    TargetToNative,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::NativeToTarget => Direction::TargetToNative,
            Direction::TargetToNative => Direction::NativeToTarget,
        }
    }
}

impl Store {
    /// 读取练习方向；缺失或值非法时回落到默认方向
    pub fn get_direction(&self) -> Result<Direction, StoreError> {
        let Some(raw) = self.settings.get(keys::DIRECTION_KEY.as_bytes())? else {
            return Ok(Direction::default());
        };
        match serde_json::from_slice(&raw) {
            Ok(direction) => Ok(direction),
            Err(error) => {
                tracing::warn!(%error, "Invalid persisted direction, using default");
                Ok(Direction::default())
            }
        }
    }

    pub fn set_direction(&self, direction: Direction) -> Result<(), StoreError> {
        self.settings
            .insert(keys::DIRECTION_KEY.as_bytes(), Self::serialize(&direction)?)?;
        self.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn direction_defaults_and_round_trips() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        assert_eq!(store.get_direction().unwrap(), Direction::NativeToTarget);

        store.set_direction(Direction::TargetToNative).unwrap();
        assert_eq!(store.get_direction().unwrap(), Direction::TargetToNative);
    }

    #[test]
    fn invalid_persisted_direction_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("db").to_str().unwrap()).unwrap();

        store
            .settings
            .insert(keys::DIRECTION_KEY.as_bytes(), b"\"sideways\"".to_vec())
            .unwrap();
        assert_eq!(store.get_direction().unwrap(), Direction::NativeToTarget);
    }
}
