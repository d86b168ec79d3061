//! 持久化键值存储
//!
//! 语义对齐浏览器的 `localStorage`：值都是字符串，键不存在返回 `None`。
//! 会话只使用两个键：`token` 与 `user`（JSON 序列化的用户）。

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::common::AppResult;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// 写入成功返回 true
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除成功（或键本就不存在）返回 true
    fn delete(&self, key: &str) -> bool;
}

/// 进程内存储，进程退出即丢失
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.remove(key);
        true
    }
}

/// 文件存储
///
/// 不做缓存：每次读取都从文件加载，其他进程写入的会话在下一次 `check_auth` 时即可见。
/// 写入时先重新加载再修改单个键，最后经临时文件 `rename` 覆盖，
/// 不会用本进程的旧快照覆盖别人的写入，也不会留下写了一半的文件。
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // 串行化本进程内的读-改-写
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let storage = Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        };
        storage.load()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => Ok(map),
                Err(e) => {
                    tracing::warn!("storage file {} is corrupt, treating as empty: {}", self.path.display(), e);
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        let content = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(format!(".{}.tmp", std::process::id()));
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> bool {
        let Ok(_guard) = self.write_lock.lock() else {
            return false;
        };

        let result = self.load().and_then(|mut entries| {
            if apply(&mut entries) {
                self.store(&entries)
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("failed to write storage file {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::error!("failed to read storage file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn delete(&self, key: &str) -> bool {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
