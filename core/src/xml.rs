// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Streaming XML decoding through a stack of handlers.
//!
//! A response document is decoded by a closed set of handlers, usually one
//! enum implementing [`Handle`]. The driver in [`parse`] feeds `quick-xml`
//! events to the handler on top of its stack:
//!
//! - element start goes to [`Handle::start_element`] with the local name.
//! - text and CDATA are buffered for the current handler.
//! - element end goes to [`Handle::end_element`] with the trimmed text seen
//!   since the matching start.
//!
//! A handler may answer [`Step::Transfer`] to push a child handler, which then
//! receives every event until it answers [`Step::Return`]. The driver pops the
//! child, calls [`Handle::finish`] on it and hands the output to the parent
//! through [`Handle::child_finished`]. A `Return` from the root handler marks
//! the document complete.
//!
//! Elements a handler doesn't know about are ignored, so documents that grow
//! new elements keep decoding.

use std::io::BufRead;
use std::mem;
use std::str::FromStr;

use log::trace;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{Error, Result};

/// What the driver should do after an element callback.
#[derive(Debug)]
pub enum Step<H> {
    /// Keep the current handler.
    Continue,
    /// Push the given handler, it becomes the current one.
    Transfer(H),
    /// The current handler's object is complete, pop it.
    Return,
}

/// A handler of element events.
pub trait Handle: Sized {
    /// Value built by a finished handler.
    type Output;

    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// An element started.
    fn start_element(&mut self, name: &str) -> Result<Step<Self>>;

    /// An element ended, `text` is its trimmed character data.
    fn end_element(&mut self, name: &str, text: &str) -> Result<Step<Self>>;

    /// A child handler pushed by this handler returned.
    fn child_finished(&mut self, output: Self::Output) -> Result<()>;

    /// Build the value of this handler.
    fn finish(self) -> Result<Self::Output>;
}

struct Frame<H> {
    handler: H,
    text: String,
}

struct Driver<H: Handle> {
    stack: Vec<Frame<H>>,
    depth: usize,
    completed: bool,
    /// Set when a popped handler failed to finish.
    failed_in: Option<&'static str>,
}

impl<H: Handle> Driver<H> {
    fn new(root: H) -> Self {
        Self {
            stack: vec![Frame {
                handler: root,
                text: String::new(),
            }],
            depth: 0,
            completed: false,
            failed_in: None,
        }
    }

    fn active(&self) -> &'static str {
        self.failed_in
            .or_else(|| self.stack.last().map(|f| f.handler.name()))
            .unwrap_or("unknown")
    }

    fn top(&mut self) -> Result<&mut Frame<H>> {
        self.stack
            .last_mut()
            .ok_or_else(|| Error::unexpected("handler stack is empty"))
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.depth += 1;

        let frame = self.top()?;
        frame.text.clear();
        let step = frame.handler.start_element(name)?;
        if matches!(step, Step::Continue) {
            trace!("element <{name}> has no effect on {}", frame.handler.name());
        }
        self.apply(step)
    }

    fn text(&mut self, content: &str) -> Result<()> {
        self.top()?.text.push_str(content);
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| Error::parse_failed(format!("unexpected end element </{name}>")))?;

        let frame = self.top()?;
        let text = mem::take(&mut frame.text);
        let step = frame.handler.end_element(name, text.trim())?;
        self.apply(step)
    }

    fn apply(&mut self, step: Step<H>) -> Result<()> {
        match step {
            Step::Continue => Ok(()),
            Step::Transfer(child) => {
                trace!("transfer to {}", child.name());
                self.stack.push(Frame {
                    handler: child,
                    text: String::new(),
                });
                Ok(())
            }
            Step::Return if self.stack.len() == 1 => {
                self.completed = true;
                Ok(())
            }
            Step::Return => {
                let frame = self
                    .stack
                    .pop()
                    .ok_or_else(|| Error::unexpected("handler stack is empty"))?;
                let child = frame.handler.name();
                self.failed_in = Some(child);
                let output = frame.handler.finish()?;
                self.failed_in = None;

                trace!("return from {child}");
                self.top()?.handler.child_finished(output)
            }
        }
    }

    fn finish(mut self) -> Result<H::Output> {
        if self.depth != 0 {
            return Err(Error::parse_failed(format!(
                "document ended with {} element(s) still open",
                self.depth
            )));
        }
        if !self.completed || self.stack.len() != 1 {
            return Err(Error::parse_failed(
                "document ended before its root element was complete",
            ));
        }

        let root = self
            .stack
            .pop()
            .ok_or_else(|| Error::unexpected("handler stack is empty"))?;
        root.handler.finish()
    }

    /// Wrap an error into a parse failure naming the active handler.
    fn fail(&self, err: Error) -> Error {
        Error::parse_failed(format!("{} handler: {}", self.active(), err.message()))
            .with_source(err)
    }
}

/// Decode one document from `reader` with `root` as the bottom handler.
///
/// The reader is consumed and dropped on every path. Any failure, including
/// a document that ends early or never completes its root, yields a single
/// [`crate::ErrorKind::ParseFailed`] error and no partial output.
pub fn parse<H, R>(reader: R, root: H) -> Result<H::Output>
where
    H: Handle,
    R: BufRead,
{
    let mut driver = Driver::new(root);
    let mut reader = Reader::from_reader(reader);

    if let Err(err) = drive(&mut reader, &mut driver) {
        return Err(driver.fail(err));
    }

    let name = driver.active();
    driver.finish().map_err(|err| {
        Error::parse_failed(format!("{name} handler: {}", err.message())).with_source(err)
    })
}

fn drive<H: Handle, R: BufRead>(reader: &mut Reader<R>, driver: &mut Driver<H>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => driver.start(element_name(e.local_name().into_inner())?)?,
            Event::End(e) => driver.end(element_name(e.local_name().into_inner())?)?,
            Event::Empty(e) => {
                let name = element_name(e.local_name().into_inner())?;
                driver.start(name)?;
                driver.end(name)?;
            }
            Event::Text(e) => driver.text(&e.unescape()?)?,
            Event::CData(e) => driver.text(std::str::from_utf8(&e)?)?,
            Event::Eof => return Ok(()),
            // Declarations, comments and processing instructions carry nothing.
            _ => {}
        }
        buf.clear();
    }
}

fn element_name(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|e| Error::parse_failed("element name is not utf-8").with_source(e))
}

/// Parse a `true`/`false` element value.
pub fn parse_bool(element: &str, text: &str) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::parse_failed(format!(
            "<{element}> expects true or false, got {text:?}"
        ))),
    }
}

/// Parse a numeric element value.
pub fn parse_number<T: FromStr>(element: &str, text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::parse_failed(format!("<{element}> expects a number, got {text:?}")))
}
