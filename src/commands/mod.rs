/// `compiler` command: locate spcomp next to an include directory.
pub mod compiler;

/// `include` commands: write SourcePawn include files.
pub mod include;

/// `init` command: write a starter configuration file.
pub mod init;

/// `manifest` command: build the update manifest.
pub mod manifest;

/// `version` command: print git version information.
pub mod version;
