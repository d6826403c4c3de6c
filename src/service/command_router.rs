use std::sync::Arc;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::{debug, error, warn};
use crate::error::router_error::RouterError;
use crate::model::command::{Command, CommandResponse};
use crate::service::bookmark_service::BookmarkService;
use crate::service::page_agent::PageAgent;
use crate::service::scroll_accessor::ScrollAccessor;
use crate::service::session_context::SessionContext;

/// The answer to one routed command. Consuming it yields at most one response.
pub enum Reply<'a> {
    /// Answered from memory while routing; `None` for fire-and-forget commands.
    Immediate(Option<CommandResponse>),
    /// Needs storage or another context; the caller must await it.
    Deferred(BoxFuture<'a, CommandResponse>),
}

impl Reply<'_> {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Reply::Deferred(_))
    }

    pub async fn resolve(self) -> Option<CommandResponse> {
        match self {
            Reply::Immediate(response) => response,
            Reply::Deferred(response) => Some(response.await),
        }
    }
}

/// Single dispatch point for control surfaces and page agents.
pub struct CommandRouter {
    bookmark_service: Arc<BookmarkService>,
    scroll_accessor: Arc<ScrollAccessor>,
    page_agent: Option<Arc<PageAgent>>,
}

impl CommandRouter {
    pub fn new(bookmark_service: Arc<BookmarkService>, scroll_accessor: Arc<ScrollAccessor>) -> Self {
        CommandRouter { bookmark_service, scroll_accessor, page_agent: None }
    }

    /// Router running inside a page, able to answer agent-directed commands.
    pub fn with_page_agent(mut self, page_agent: Arc<PageAgent>) -> Self {
        self.page_agent = Some(page_agent);
        self
    }

    pub async fn dispatch(&self, context: &SessionContext, command: Command) -> Result<Option<CommandResponse>, RouterError> {
        Ok(self.route(context, command)?.resolve().await)
    }

    pub fn route<'a>(&'a self, context: &'a SessionContext, command: Command) -> Result<Reply<'a>, RouterError> {
        debug!("routing command [{}]", command.kind());
        let kind = command.kind();
        match command {
            Command::SaveBookmark { url, name, scroll_position, tab_id } => {
                let tab_id = tab_id.or(context.tab_id());
                Ok(Reply::Deferred(async move {
                    match self.bookmark_service.save(&url, name, scroll_position, tab_id).await {
                        Ok(_) => CommandResponse::success(),
                        Err(e) => {
                            error!("failed to save bookmark for [{}]: [{}]", url, e);
                            CommandResponse::failure(format!("Failed to save bookmark: {}", e))
                        }
                    }
                }.boxed()))
            }
            Command::GetBookmarks { url } => {
                let url = url.or_else(|| context.url().map(str::to_string));
                Ok(Reply::Deferred(async move {
                    CommandResponse::Bookmarks { bookmarks: self.bookmark_service.list(url.as_deref()).await }
                }.boxed()))
            }
            Command::DeleteBookmark { url, bookmark_id } => {
                let url = url
                    .or_else(|| context.url().map(str::to_string))
                    .ok_or_else(|| RouterError::MissingUrl(kind.to_string()))?;
                Ok(Reply::Deferred(async move {
                    match self.bookmark_service.delete(&url, &bookmark_id).await {
                        Ok(_) => CommandResponse::success(),
                        Err(e) => {
                            error!("failed to delete bookmark [{}] for [{}]: [{}]", bookmark_id, url, e);
                            CommandResponse::failure(format!("Failed to delete bookmark: {}", e))
                        }
                    }
                }.boxed()))
            }
            Command::JumpToBookmark { scroll_position, tab_id } => {
                let tab_id = tab_id
                    .or(context.tab_id())
                    .ok_or_else(|| RouterError::MissingTab(kind.to_string()))?;
                Ok(Reply::Deferred(async move {
                    match self.scroll_accessor.write_position(tab_id, scroll_position).await {
                        Ok(_) => CommandResponse::success(),
                        Err(e) => CommandResponse::failure(format!("Failed to jump to bookmark: {}", e)),
                    }
                }.boxed()))
            }
            Command::ScrollToPosition { scroll_position } => {
                let page_agent = self.require_agent(kind)?;
                page_agent.scroll_to_position(scroll_position);
                Ok(Reply::Immediate(Some(CommandResponse::success())))
            }
            Command::GetCurrentPosition => match (&self.page_agent, context.tab_id()) {
                (Some(page_agent), _) => Ok(Reply::Immediate(Some(CommandResponse::Position {
                    scroll_position: page_agent.current_position(),
                }))),
                (None, Some(tab_id)) => Ok(Reply::Deferred(async move {
                    CommandResponse::Position {
                        scroll_position: self.scroll_accessor.read_position_or_default(tab_id).await,
                    }
                }.boxed())),
                (None, None) => Err(RouterError::AgentNotAttached(kind.to_string())),
            },
            Command::BookmarkSaved { bookmark } => {
                let page_agent = self.require_agent(kind)?;
                debug!("bookmark [{}] saved for this page", bookmark.id);
                page_agent.bookmark_saved();
                Ok(Reply::Immediate(None))
            }
        }
    }

    fn require_agent(&self, kind: &str) -> Result<&PageAgent, RouterError> {
        match &self.page_agent {
            Some(page_agent) => Ok(page_agent.as_ref()),
            None => {
                warn!("command [{}] needs a resident page agent", kind);
                Err(RouterError::AgentNotAttached(kind.to_string()))
            }
        }
    }
}
