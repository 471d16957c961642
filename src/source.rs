use crate::error::SourceError;
use crate::skeleton::{Joint, JointName, Skeleton};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::{info, trace, warn};

/// One line of input: skeletons as maps from joint name to position.
type RawFrame = Vec<HashMap<String, Joint>>;

/// Newline-delimited JSON skeleton frame reader.
///
/// Each line carries one frame: a JSON array with one object per detected
/// subject, mapping joint names to `{"x": .., "y": ..}` positions in
/// normalized image space. Joint names outside the known vocabulary are
/// ignored; malformed lines are skipped and counted, never fatal.
pub struct SkeletonSource<R> {
    lines: Lines<BufReader<R>>,
    frames_read: u64,
    malformed_lines: u64,
}

impl SkeletonSource<File> {
    /// Open a skeleton stream from a file path.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref).await.map_err(|e| SourceError::Open {
            path: path_ref.display().to_string(),
            source: e,
        })?;
        info!("Reading skeleton frames from {}", path_ref.display());
        Ok(Self::from_reader(file))
    }
}

impl SkeletonSource<tokio::io::Stdin> {
    /// Read skeleton frames piped in from the pose pipeline.
    pub fn from_stdin() -> Self {
        info!("Reading skeleton frames from stdin");
        Self::from_reader(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> SkeletonSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            frames_read: 0,
            malformed_lines: 0,
        }
    }

    /// Next frame, or `None` at end of stream. Blank and malformed lines
    /// are skipped.
    pub async fn next_frame(&mut self) -> Result<Option<Vec<Skeleton>>, SourceError> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<RawFrame>(&line) {
                Ok(raw) => {
                    self.frames_read += 1;
                    return Ok(Some(raw.into_iter().map(convert_skeleton).collect()));
                }
                Err(e) => {
                    self.malformed_lines += 1;
                    warn!("Skipping malformed skeleton frame line: {}", e);
                }
            }
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn malformed_lines(&self) -> u64 {
        self.malformed_lines
    }
}

fn convert_skeleton(raw: HashMap<String, Joint>) -> Skeleton {
    let mut skeleton = Skeleton::new();
    for (name, joint) in raw {
        match JointName::from_name(&name) {
            Some(joint_name) => skeleton.set_joint(joint_name, joint),
            None => trace!("Ignoring unknown joint name: {}", name),
        }
    }
    skeleton
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_frames_in_order() {
        let data = concat!(
            "[{\"nose\":{\"x\":0.5,\"y\":0.2}}]\n",
            "[]\n",
            "[{\"left_shoulder\":{\"x\":0.6,\"y\":0.4},\"right_shoulder\":{\"x\":0.4,\"y\":0.4}}]\n",
        );
        let mut source = SkeletonSource::from_reader(data.as_bytes());

        let frame = source.next_frame().await.unwrap().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(
            frame[0].joint(JointName::Nose),
            Some(Joint::new(0.5, 0.2))
        );

        // An empty array is a valid frame with no subjects.
        let frame = source.next_frame().await.unwrap().unwrap();
        assert!(frame.is_empty());

        let frame = source.next_frame().await.unwrap().unwrap();
        assert_eq!(
            frame[0].joint(JointName::LeftShoulder),
            Some(Joint::new(0.6, 0.4))
        );

        assert_eq!(source.next_frame().await.unwrap(), None);
        assert_eq!(source.frames_read(), 3);
    }

    #[tokio::test]
    async fn test_malformed_lines_skipped_and_counted() {
        let data = concat!(
            "not json at all\n",
            "\n",
            "[{\"nose\":{\"x\":0.1,\"y\":0.1}}]\n",
        );
        let mut source = SkeletonSource::from_reader(data.as_bytes());

        let frame = source.next_frame().await.unwrap().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(source.malformed_lines(), 1);
        assert_eq!(source.frames_read(), 1);
    }

    #[tokio::test]
    async fn test_unknown_joint_names_ignored() {
        let data = "[{\"nose\":{\"x\":0.5,\"y\":0.2},\"tail\":{\"x\":0.9,\"y\":0.9}}]\n";
        let mut source = SkeletonSource::from_reader(data.as_bytes());

        let frame = source.next_frame().await.unwrap().unwrap();
        assert_eq!(frame[0].len(), 1);
        assert!(frame[0].joint(JointName::Nose).is_some());
    }
}
