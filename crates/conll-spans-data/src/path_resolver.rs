//! # Cache Path Resolver

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// Environment variable key to override the default cache directory.
pub const CONLL_SPANS_CACHE_DIR: &str = "CONLL_SPANS_CACHE_DIR";

/// Default [`PathResolver`] for conll-spans.
pub const CONLL_SPANS_PATHS: PathResolver = PathResolver {
    qualifier: "io.crates.conll-spans",
    organization: "",
    application: "conll-spans",
    cache_env_vars: &[CONLL_SPANS_CACHE_DIR],
};

/// Static configuration for cache directory resolution.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Cache directory environment variables, in resolution order.
    pub cache_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// Resolve the cache directory.
    ///
    /// Resolution Order:
    /// 1. `path`, if present; `~` and `$VAR` are expanded.
    /// 2. ``env[$VAR]`` for each `self.cache_env_vars`; in order.
    /// 3. `self.project_dirs().cache_dir()`, if present.
    /// 4. `None`
    ///
    /// On Linux the project dir is `$XDG_CACHE_HOME/conll-spans`
    /// or `$HOME/.cache/conll-spans`.
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path.as_ref() {
            let path = path.as_ref();
            return Some(match path.to_str().map(shellexpand::full) {
                Some(Ok(expanded)) => PathBuf::from(expanded.into_owned()),
                _ => path.to_path_buf(),
            });
        }

        for env_var in self.cache_env_vars {
            if let Ok(path) = env::var(env_var) {
                return Some(PathBuf::from(path));
            }
        }

        self.project_dirs().map(|pds| pds.cache_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const CACHE_ENV1: &str = "_CONLL_SPANS_TEST_CACHE_ENV1";
    const CACHE_ENV2: &str = "_CONLL_SPANS_TEST_CACHE_ENV2";

    const TEST_CONFIG: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "example",
        cache_env_vars: &[CACHE_ENV1, CACHE_ENV2],
    };

    #[test]
    #[serial]
    fn test_resolve_cache_dir() {
        let pds = TEST_CONFIG
            .project_dirs()
            .expect("failed to get project dirs");

        let no_path: Option<PathBuf> = None;
        let user_dir = PathBuf::from("/tmp/conll_spans/user");
        let env_dir1 = PathBuf::from("/tmp/conll_spans/env.1");
        let env_dir2 = PathBuf::from("/tmp/conll_spans/env.2");

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }

        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone())),
            Some(user_dir.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(pds.cache_dir().to_path_buf())
        );

        // Lowest priority var.
        unsafe {
            env::set_var(CACHE_ENV2, env_dir2.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone())),
            Some(user_dir.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(env_dir2.clone())
        );

        // Higher priority var.
        unsafe {
            env::set_var(CACHE_ENV1, env_dir1.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(env_dir1.clone())
        );

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }
    }

    #[test]
    #[serial]
    fn test_user_path_expansion() {
        let Ok(home) = env::var("HOME") else {
            return;
        };
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some("~/conll")),
            Some(PathBuf::from(home).join("conll"))
        );
    }
}
